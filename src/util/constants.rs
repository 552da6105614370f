// LeadTrack - util/constants.rs
//
// Single source of truth for named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "LeadTrack";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "LeadTrack";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Storage
// =============================================================================

/// Key under which the lead array is stored. Any writer must use this key.
pub const LEADS_KEY: &str = "leads";

/// Name of the key-value store directory inside the data directory.
pub const STORE_DIR_NAME: &str = "store";

/// Extension of the per-key value files in the file store.
pub const STORE_VALUE_EXTENSION: &str = "json";

/// Largest stored value accepted on read. Anything bigger is treated as
/// corrupt rather than loaded into memory.
pub const MAX_STORE_VALUE_BYTES: u64 = 16 * 1024 * 1024; // 16 MB

// =============================================================================
// Leads
// =============================================================================

/// Display format of `updatedAt`, e.g. "May 22, 2025 11:02 PM".
pub const UPDATED_AT_FORMAT: &str = "%B %-d, %Y %-I:%M %p";

/// Include the built-in sample leads in the Leads view by default.
pub const DEFAULT_SEED_IN_LEADS_VIEW: bool = true;

/// Include the built-in sample leads in the Filter view by default.
pub const DEFAULT_SEED_IN_FILTER_VIEW: bool = false;

// =============================================================================
// Background loading
// =============================================================================

/// How long a blocking CLI command waits for a background lead load.
pub const LOAD_WAIT_TIMEOUT_MS: u64 = 5_000;

// =============================================================================
// Configuration
// =============================================================================

/// Config file name (lives next to the config directory).
pub const CONFIG_FILE_NAME: &str = "config.toml";

// =============================================================================
// Logging
// =============================================================================

/// Default log level when neither RUST_LOG, --debug, nor config set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in `[logging] level`.
pub const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
