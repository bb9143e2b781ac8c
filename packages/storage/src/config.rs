// ABOUTME: Storage configuration with environment overrides
// ABOUTME: Database location, pool sizing and tag deletion behaviour

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;
use zen_config::{
    parse_env_flag_or_default, parse_env_or_default, parse_env_or_default_with_validation,
    DEFAULT_BUSY_TIMEOUT_SECS, DEFAULT_DB_FILE, DEFAULT_MAX_CONNECTIONS, ZEN_DB_BUSY_TIMEOUT_SECS,
    ZEN_DB_ENABLE_WAL, ZEN_DB_MAX_CONNECTIONS, ZEN_DB_PATH, ZEN_TAGS_PRUNE_FOCUS_MODES,
};

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    pub database_path: PathBuf,
    pub enable_wal: bool,
    pub max_connections: u32,
    pub busy_timeout_seconds: u64,
    /// Also remove `focus_mode_tags` rows when a tag is deleted.
    pub prune_focus_mode_links: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DB_FILE),
            enable_wal: true,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            busy_timeout_seconds: DEFAULT_BUSY_TIMEOUT_SECS,
            prune_focus_mode_links: false,
        }
    }
}

impl StorageConfig {
    /// Build a configuration from `ZEN_*` environment variables. Unset or
    /// invalid values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            database_path: parse_env_or_default(ZEN_DB_PATH, defaults.database_path),
            enable_wal: parse_env_flag_or_default(ZEN_DB_ENABLE_WAL, defaults.enable_wal),
            max_connections: parse_env_or_default_with_validation(
                ZEN_DB_MAX_CONNECTIONS,
                defaults.max_connections,
                |v| v > 0,
            ),
            busy_timeout_seconds: parse_env_or_default(
                ZEN_DB_BUSY_TIMEOUT_SECS,
                defaults.busy_timeout_seconds,
            ),
            prune_focus_mode_links: parse_env_flag_or_default(
                ZEN_TAGS_PRUNE_FOCUS_MODES,
                defaults.prune_focus_mode_links,
            ),
        };
        debug!("Loaded storage config: {:?}", config);
        config
    }
}
