// src/domain/import.rs
use derive_builder::Builder;
use serde::Serialize;

use crate::domain::tag::TagSet;

/// Policy configuration for one import run; immutable for its lifetime.
///
/// `user_tags` are merged into every candidate's tags for the overflow
/// checks. Any `fail_*` flag being set means a failure halts further
/// processing (not further counting).
#[derive(Debug, Clone, Default, Builder)]
#[builder(default)]
pub struct ImportOptions {
    pub skip_if_any_invalid_tag: bool,
    pub skip_on_merge_overflow: bool,
    pub skip_if_too_many_tags: bool,
    pub fail_if_any_invalid_tag: bool,
    pub fail_on_merge_overflow: bool,
    pub fail_if_too_many_tags: bool,
    pub user_tags: TagSet,
}

/// Why one record was discarded while the import proceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SkipReason {
    InvalidTag,
    TagMergeOverflow,
    TagsTooLarge,
}

/// Why a record failed; may mark the whole import as failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FailReason {
    InvalidUrl,
    InvalidTag,
    MergeOverflow,
    TooManyTags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OutcomeStatus {
    Success,
    FailedInvalidUrl,
    FailedInvalidTag,
    FailedMergeOverflow,
    FailedTooManyTags,
    FailedSystemError,
}

impl From<FailReason> for OutcomeStatus {
    fn from(reason: FailReason) -> Self {
        match reason {
            FailReason::InvalidUrl => OutcomeStatus::FailedInvalidUrl,
            FailReason::InvalidTag => OutcomeStatus::FailedInvalidTag,
            FailReason::MergeOverflow => OutcomeStatus::FailedMergeOverflow,
            FailReason::TooManyTags => OutcomeStatus::FailedTooManyTags,
        }
    }
}

/// Accumulating counters for one import run, built incrementally by the
/// sink's stat recorder and read once at the end of the run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub imported: usize,
    pub skipped: usize,
    pub failed: usize,
    pub not_processed: usize,

    // per-category breakdowns
    pub skipped_invalid_tag: usize,
    pub skipped_merge_overflow: usize,
    pub skipped_tags_too_large: usize,
    pub failed_invalid_url: usize,
    pub failed_invalid_tag: usize,
    pub failed_merge_overflow: usize,
    pub failed_too_many_tags: usize,
}

impl ImportStats {
    pub fn record_imported(&mut self) {
        self.imported += 1;
    }

    pub fn record_skipped(&mut self, reason: SkipReason) {
        self.skipped += 1;
        match reason {
            SkipReason::InvalidTag => self.skipped_invalid_tag += 1,
            SkipReason::TagMergeOverflow => self.skipped_merge_overflow += 1,
            SkipReason::TagsTooLarge => self.skipped_tags_too_large += 1,
        }
    }

    pub fn record_failed(&mut self, reason: FailReason) {
        self.failed += 1;
        match reason {
            FailReason::InvalidUrl => self.failed_invalid_url += 1,
            FailReason::InvalidTag => self.failed_invalid_tag += 1,
            FailReason::MergeOverflow => self.failed_merge_overflow += 1,
            FailReason::TooManyTags => self.failed_too_many_tags += 1,
        }
    }

    pub fn record_not_processed(&mut self) {
        self.not_processed += 1;
    }

    pub fn total(&self) -> usize {
        self.imported + self.skipped + self.failed + self.not_processed
    }
}

/// Final result of one import run. Created exactly once, at the end of the
/// run (or on the error path), and never mutated afterward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    status: OutcomeStatus,
    stats: ImportStats,
}

impl ImportOutcome {
    pub fn success(stats: ImportStats) -> Self {
        Self {
            status: OutcomeStatus::Success,
            stats,
        }
    }

    /// A failed outcome can never carry `Success`: the status is derived
    /// from the latched reason.
    pub fn failed(reason: FailReason, stats: ImportStats) -> Self {
        Self {
            status: reason.into(),
            stats,
        }
    }

    pub fn system_error(stats: ImportStats) -> Self {
        Self {
            status: OutcomeStatus::FailedSystemError,
            stats,
        }
    }

    pub fn status(&self) -> OutcomeStatus {
        self.status
    }

    pub fn stats(&self) -> &ImportStats {
        &self.stats
    }

    pub fn is_failure(&self) -> bool {
        self.status != OutcomeStatus::Success
    }
}
