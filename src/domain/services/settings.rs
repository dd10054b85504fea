// src/domain/services/settings.rs
use std::fmt::Debug;

/// Read-only access to process-wide settings. The import pipeline reads
/// exactly one value per run (the maximum-tags-per-bookmark cap) and
/// threads it into the policy as a parameter.
pub trait SettingsProvider: Send + Sync + Debug {
    fn get_int(&self, key: &str) -> Option<i64>;
}

/// Settings key for the maximum number of tags one bookmark may carry.
pub const MAX_TAGS_PER_BOOKMARK: &str = "max_tags_per_bookmark";
