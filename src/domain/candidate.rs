// src/domain/candidate.rs
use crate::domain::tag::TagSet;

/// One parsed, not-yet-classified bookmark record from an export file.
///
/// Lives only for the duration of a single pipeline iteration; nothing in
/// this subsystem persists it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub url: String,
    pub tags: TagSet,
    /// 1-based line of the source element, for downstream diagnostics.
    pub source_line: usize,
}

impl Candidate {
    pub fn new<S: Into<String>>(url: S, tags: TagSet, source_line: usize) -> Self {
        Self {
            url: url.into(),
            tags,
            source_line,
        }
    }
}
