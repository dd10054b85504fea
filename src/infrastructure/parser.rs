// src/infrastructure/parser.rs
//!
//! Lazy candidate extraction from bookmark export files. Export files from
//! third-party tools are frequently non-conformant HTML, so the markup
//! layer is lenient by construction: anything unparsable simply yields no
//! candidates, and parse diagnostics are suppressed.

use std::fmt;
use std::str::FromStr;

use select::document::Document;
use select::node::Node;
use select::predicate::{Child, Descendant, Name};

use crate::domain::candidate::Candidate;
use crate::domain::error::DomainError;
use crate::domain::tag::TagSet;

/// Named export format; selects the query used to locate bookmark entries
/// in the markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Chrome,
    Firefox,
    Safari,
    Pocket,
    Instapaper,
}

impl SourceFormat {
    /// Browser exports keep entries as anchors directly under `<dt>`
    /// (Netscape bookmark format); service exports nest anchors under
    /// `<li>`.
    fn uses_definition_terms(&self) -> bool {
        matches!(
            self,
            SourceFormat::Chrome | SourceFormat::Firefox | SourceFormat::Safari
        )
    }
}

impl FromStr for SourceFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chrome" => Ok(SourceFormat::Chrome),
            "firefox" => Ok(SourceFormat::Firefox),
            "safari" => Ok(SourceFormat::Safari),
            "pocket" => Ok(SourceFormat::Pocket),
            "instapaper" => Ok(SourceFormat::Instapaper),
            other => Err(DomainError::Other(format!(
                "Unknown source format: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceFormat::Chrome => "chrome",
            SourceFormat::Firefox => "firefox",
            SourceFormat::Safari => "safari",
            SourceFormat::Pocket => "pocket",
            SourceFormat::Instapaper => "instapaper",
        };
        write!(f, "{}", name)
    }
}

/// Parsed export file producing candidates on demand.
///
/// `candidates` yields lazily and is meant to be consumed once,
/// front-to-back; a second traversal requires re-parsing.
pub struct SourceParser {
    source: String,
    document: Document,
    format: SourceFormat,
}

impl SourceParser {
    pub fn new(raw: &[u8], format: SourceFormat) -> Self {
        let source = String::from_utf8_lossy(raw).into_owned();
        let document = Document::from(source.as_str());
        Self {
            source,
            document,
            format,
        }
    }

    pub fn candidates(&self) -> Candidates<'_> {
        let anchors: Box<dyn Iterator<Item = Node<'_>> + '_> = if self.format.uses_definition_terms()
        {
            Box::new(self.document.find(Child(Name("dt"), Name("a"))))
        } else {
            Box::new(self.document.find(Descendant(Name("li"), Name("a"))))
        };
        Candidates {
            anchors,
            source: &self.source,
            cursor: 0,
            line: 1,
        }
    }
}

impl fmt::Debug for SourceParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceParser")
            .field("format", &self.format)
            .field("bytes", &self.source.len())
            .finish()
    }
}

/// Single-pass candidate iterator over the matched anchors.
pub struct Candidates<'a> {
    anchors: Box<dyn Iterator<Item = Node<'a>> + 'a>,
    source: &'a str,
    cursor: usize,
    line: usize,
}

impl Candidates<'_> {
    /// Locate `needle` in the raw text at or after the cursor and return
    /// its 1-based line. The scan is monotonic, so line lookup stays
    /// linear over the whole document; the cursor moves past the match so
    /// repeated URLs resolve to their own occurrences. Best effort: a URL
    /// the DOM decoded away from the raw text keeps the previous line.
    fn advance_to(&mut self, needle: &str) -> usize {
        if let Some(rel) = self.source[self.cursor..].find(needle) {
            let abs = self.cursor + rel;
            self.line += self.source[self.cursor..abs].matches('\n').count();
            let line = self.line;
            let end = abs + needle.len();
            self.line += self.source[abs..end].matches('\n').count();
            self.cursor = end;
            return line;
        }
        self.line
    }
}

impl Iterator for Candidates<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = self.anchors.next()?;
            // Anchors without a target are not bookmark entries.
            let Some(href) = node.attr("href") else {
                continue;
            };
            let tags = node
                .attr("tags")
                .map(TagSet::from_attribute)
                .unwrap_or_else(TagSet::empty);
            let line = self.advance_to(href);
            return Some(Candidate::new(href, tags, line));
        }
    }
}
