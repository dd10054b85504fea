// src/domain/tag.rs
use std::fmt;

use itertools::Itertools;

/// Longest tag value we accept; anything beyond is classified invalid.
const MAX_TAG_LENGTH: usize = 255;

/// A tag is valid when it is non-empty, carries no commas or whitespace,
/// and stays within the length bound.
fn is_valid_tag(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_TAG_LENGTH
        && !value.contains(',')
        && !value.chars().any(char::is_whitespace)
}

/// An ordered collection of tag strings attached to one bookmark record.
///
/// Intake normalizes values (trim, lowercase), drops empties and
/// deduplicates preserving first-seen order. Invalid values (see
/// `is_valid_tag`) are kept so they can be classified later; only
/// validity and count ever influence import decisions, never order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags = values
            .into_iter()
            .map(|v| v.as_ref().trim().to_lowercase())
            .filter(|v| !v.is_empty())
            .unique()
            .collect();
        Self { tags }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a comma-separated `tags` attribute value from an export file.
    pub fn from_attribute(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    pub fn count(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// True if any member fails the validity predicate.
    pub fn has_invalid(&self) -> bool {
        self.tags.iter().any(|t| !is_valid_tag(t))
    }

    /// The subset passing the validity predicate.
    pub fn valid_only(&self) -> TagSet {
        Self {
            tags: self
                .tags
                .iter()
                .filter(|t| is_valid_tag(t))
                .cloned()
                .collect(),
        }
    }

    /// Order-preserving dedup union with another tag set.
    pub fn merged_with(&self, other: &TagSet) -> TagSet {
        Self::new(self.tags.iter().chain(other.tags.iter()))
    }

    /// Whether merging the raw tag list with `other` exceeds `cap`.
    ///
    /// Deliberately merges the raw list, not `valid_only()`; the skip-path
    /// overflow check performs its own `valid_only()` merge instead.
    pub fn will_overflow_when_merged_with(&self, other: &TagSet, cap: usize) -> bool {
        self.merged_with(other).count() > cap
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tags.join(","))
    }
}
