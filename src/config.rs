// src/config.rs
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{instrument, trace};

use crate::domain::error::DomainResult;
use crate::domain::services::settings::{SettingsProvider, MAX_TAGS_PER_BOOKMARK};

pub const DEFAULT_MAX_TAGS_PER_BOOKMARK: i64 = 10;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Directory holding uploaded export files, one subdirectory per user
    #[serde(default = "default_import_dir")]
    pub import_dir: String,

    /// Maximum number of tags one bookmark may carry after merging
    #[serde(default = "default_max_tags")]
    pub max_tags_per_bookmark: i64,
}

fn default_import_dir() -> String {
    let dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("../data"))
        .join("linkstash/imports");

    // Ensure directory exists
    std::fs::create_dir_all(&dir).ok();

    dir.to_str().unwrap_or("../data/linkstash/imports").to_string()
}

fn default_max_tags() -> i64 {
    DEFAULT_MAX_TAGS_PER_BOOKMARK
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            import_dir: default_import_dir(),
            max_tags_per_bookmark: default_max_tags(),
        }
    }
}

impl SettingsProvider for Settings {
    fn get_int(&self, key: &str) -> Option<i64> {
        match key {
            MAX_TAGS_PER_BOOKMARK => Some(self.max_tags_per_bookmark),
            _ => None,
        }
    }
}

// Load settings from config files and environment variables
#[instrument(level = "debug")]
pub fn load_settings() -> DomainResult<Settings> {
    trace!("Loading settings");

    // Start with default settings
    let mut settings = Settings::default();

    // Check for a config file in the standard location
    let config_sources = [dirs::home_dir().map(|p| p.join(".config/linkstash/config.toml"))];

    for config_path in config_sources.iter().flatten() {
        if config_path.exists() {
            trace!("Loading config from: {:?}", config_path);

            if let Ok(config_text) = std::fs::read_to_string(config_path) {
                if let Ok(file_settings) = toml::from_str::<Settings>(&config_text) {
                    settings.import_dir = file_settings.import_dir;
                    settings.max_tags_per_bookmark = file_settings.max_tags_per_bookmark;
                }
            }
        }
    }

    // Override with environment variables
    if let Ok(import_dir) = std::env::var("LINKSTASH_IMPORT_DIR") {
        trace!("Using LINKSTASH_IMPORT_DIR from environment: {}", import_dir);
        settings.import_dir = import_dir;
    }

    if let Ok(raw) = std::env::var("LINKSTASH_MAX_TAGS_PER_BOOKMARK") {
        if let Ok(max_tags) = raw.parse::<i64>() {
            trace!("Using LINKSTASH_MAX_TAGS_PER_BOOKMARK from environment: {}", max_tags);
            settings.max_tags_per_bookmark = max_tags;
        }
    }

    trace!("Settings loaded: {:?}", settings);
    Ok(settings)
}

pub fn generate_default_config() -> String {
    let default_settings = Settings::default();
    toml::to_string_pretty(&default_settings)
        .unwrap_or_else(|_| "# Error generating default configuration".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::EnvGuard;
    use serial_test::serial;
    use std::env;

    #[test]
    #[serial]
    fn given_clean_environment_when_load_then_defaults_apply() {
        let _guard = EnvGuard::new();
        env::remove_var("LINKSTASH_IMPORT_DIR");
        env::remove_var("LINKSTASH_MAX_TAGS_PER_BOOKMARK");

        let settings = load_settings().unwrap();

        assert!(settings.import_dir.contains("linkstash"));
        assert_eq!(settings.max_tags_per_bookmark, DEFAULT_MAX_TAGS_PER_BOOKMARK);
    }

    #[test]
    #[serial]
    fn given_environment_variables_when_load_then_they_override() {
        let _guard = EnvGuard::new();

        env::set_var("LINKSTASH_IMPORT_DIR", "/test/imports");
        env::set_var("LINKSTASH_MAX_TAGS_PER_BOOKMARK", "7");

        let settings = load_settings().unwrap();

        assert_eq!(settings.import_dir, "/test/imports");
        assert_eq!(settings.max_tags_per_bookmark, 7);
    }

    #[test]
    #[serial]
    fn given_unparsable_max_tags_when_load_then_default_kept() {
        let _guard = EnvGuard::new();

        env::remove_var("LINKSTASH_IMPORT_DIR");
        env::set_var("LINKSTASH_MAX_TAGS_PER_BOOKMARK", "not-a-number");

        let settings = load_settings().unwrap();
        assert_eq!(settings.max_tags_per_bookmark, DEFAULT_MAX_TAGS_PER_BOOKMARK);
    }

    #[test]
    fn given_settings_when_get_int_then_only_known_keys_resolve() {
        let settings = Settings {
            import_dir: "/tmp".to_string(),
            max_tags_per_bookmark: 5,
        };
        assert_eq!(settings.get_int(MAX_TAGS_PER_BOOKMARK), Some(5));
        assert_eq!(settings.get_int("unknown_key"), None);
    }

    #[test]
    fn given_default_config_when_generated_then_contains_both_keys() {
        let config = generate_default_config();
        assert!(config.contains("import_dir"));
        assert!(config.contains("max_tags_per_bookmark"));
    }
}
