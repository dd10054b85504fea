// src/util/testing.rs

use std::collections::HashMap;
use std::env;

use tracing_subscriber::{fmt, EnvFilter};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::repositories::import_file_store::ImportFileStore;
use crate::domain::services::settings::{SettingsProvider, MAX_TAGS_PER_BOOKMARK};

/// Logging setup only runs once; subsequent calls do nothing if `tracing`
/// is already set.
pub fn init_test_logging() {
    if tracing::dispatcher::has_been_set() {
        return;
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let _ = fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(env_filter)
        .try_init();
}

/// Saves and restores the LINKSTASH_* environment variables around a test.
#[derive(Debug, Clone)]
pub struct EnvGuard {
    import_dir: Option<String>,
    max_tags: Option<String>,
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvGuard {
    pub fn new() -> Self {
        Self {
            import_dir: env::var("LINKSTASH_IMPORT_DIR").ok(),
            max_tags: env::var("LINKSTASH_MAX_TAGS_PER_BOOKMARK").ok(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var("LINKSTASH_IMPORT_DIR");
        env::remove_var("LINKSTASH_MAX_TAGS_PER_BOOKMARK");
        if let Some(val) = &self.import_dir {
            env::set_var("LINKSTASH_IMPORT_DIR", val);
        }
        if let Some(val) = &self.max_tags {
            env::set_var("LINKSTASH_MAX_TAGS_PER_BOOKMARK", val);
        }
    }
}

/// In-memory `ImportFileStore` keyed by `(user_id, import_id)`.
#[derive(Debug, Default)]
pub struct InMemoryFileStore {
    files: HashMap<(String, String), Vec<u8>>,
}

impl InMemoryFileStore {
    pub fn with_file(mut self, user_id: &str, import_id: &str, content: &[u8]) -> Self {
        self.files
            .insert((user_id.to_string(), import_id.to_string()), content.to_vec());
        self
    }
}

impl ImportFileStore for InMemoryFileStore {
    fn exists(&self, user_id: &str, import_id: &str) -> bool {
        self.files
            .contains_key(&(user_id.to_string(), import_id.to_string()))
    }

    fn read(&self, user_id: &str, import_id: &str) -> DomainResult<Vec<u8>> {
        self.files
            .get(&(user_id.to_string(), import_id.to_string()))
            .cloned()
            .ok_or_else(|| DomainError::FileNotFound(format!("{}/{}", user_id, import_id)))
    }
}

/// Settings double carrying only the tag cap.
#[derive(Debug, Clone, Copy)]
pub struct FixedSettings {
    max_tags: i64,
}

impl FixedSettings {
    pub fn with_max_tags(max_tags: i64) -> Self {
        Self { max_tags }
    }
}

impl SettingsProvider for FixedSettings {
    fn get_int(&self, key: &str) -> Option<i64> {
        (key == MAX_TAGS_PER_BOOKMARK).then_some(self.max_tags)
    }
}
