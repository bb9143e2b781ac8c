// ABOUTME: Environment variable name constants and their defaults
// ABOUTME: Centralized definitions of all environment variables read by the Zen data layer

// Database Configuration
pub const ZEN_DB_PATH: &str = "ZEN_DB_PATH";
pub const ZEN_DB_MAX_CONNECTIONS: &str = "ZEN_DB_MAX_CONNECTIONS";
pub const ZEN_DB_BUSY_TIMEOUT_SECS: &str = "ZEN_DB_BUSY_TIMEOUT_SECS";
pub const ZEN_DB_ENABLE_WAL: &str = "ZEN_DB_ENABLE_WAL";

// Tag Configuration
pub const ZEN_TAGS_PRUNE_FOCUS_MODES: &str = "ZEN_TAGS_PRUNE_FOCUS_MODES";

// Defaults
pub const DEFAULT_DB_FILE: &str = "zen.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_BUSY_TIMEOUT_SECS: u64 = 30;
