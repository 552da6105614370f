// LeadTrack - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every error keeps its cause so the
// chain can be logged in full.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all LeadTrack operations.
#[derive(Debug)]
pub enum LeadTrackError {
    /// Key-value store or lead repository failure.
    Store(StoreError),

    /// Filter construction failed (bad user input).
    Filter(FilterError),

    /// Export operation failed.
    Export(ExportError),
}

impl fmt::Display for LeadTrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(e) => write!(f, "Store error: {e}"),
            Self::Filter(e) => write!(f, "Filter error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
        }
    }
}

impl std::error::Error for LeadTrackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            Self::Filter(e) => Some(e),
            Self::Export(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

/// Errors raised by the key-value store and the lead repository.
#[derive(Debug)]
pub enum StoreError {
    /// Reading or writing a stored value failed.
    Io {
        key: String,
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },

    /// The stored value exceeds the maximum accepted size.
    ValueTooLarge { key: String, size: u64, max_size: u64 },

    /// The stored bytes are not valid UTF-8.
    InvalidUtf8 {
        key: String,
        path: PathBuf,
        source: std::string::FromUtf8Error,
    },

    /// The stored value is not a valid serialised lead array.
    Malformed {
        key: String,
        source: serde_json::Error,
    },

    /// The lead list could not be serialised.
    Serialise {
        key: String,
        source: serde_json::Error,
    },

    /// A write was refused because the current value is corrupt and would
    /// be lost.
    CorruptValue { key: String },

    /// The store lock was poisoned by a panicking writer.
    Poisoned { key: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io {
                key,
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} of key '{key}' at '{}': {source}",
                path.display()
            ),
            Self::ValueTooLarge {
                key,
                size,
                max_size,
            } => write!(
                f,
                "Value of key '{key}' is {size} bytes, exceeds maximum of {max_size} bytes"
            ),
            Self::InvalidUtf8 { key, path, source } => write!(
                f,
                "Value of key '{key}' at '{}' is not valid UTF-8: {source}",
                path.display()
            ),
            Self::Malformed { key, source } => {
                write!(f, "Value of key '{key}' is not a valid lead list: {source}")
            }
            Self::Serialise { key, source } => {
                write!(f, "Failed to serialise value for key '{key}': {source}")
            }
            Self::CorruptValue { key } => write!(
                f,
                "Refusing to write key '{key}': the stored value is corrupt. \
                 Repair or remove it first."
            ),
            Self::Poisoned { key } => {
                write!(f, "Store lock poisoned while accessing key '{key}'")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidUtf8 { source, .. } => Some(source),
            Self::Malformed { source, .. } => Some(source),
            Self::Serialise { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<StoreError> for LeadTrackError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

// ---------------------------------------------------------------------------
// Filter errors
// ---------------------------------------------------------------------------

/// Errors related to building a filter from user input.
#[derive(Debug)]
pub enum FilterError {
    /// A condition was not of the form `FIELD=VALUE`.
    InvalidCondition { input: String },

    /// The match mode was neither ALL/AND nor ANY/OR.
    InvalidMode { input: String },

    /// A field name was required but not recognised.
    UnknownField { input: String },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCondition { input } => write!(
                f,
                "Invalid condition '{input}'. Expected FIELD=VALUE, e.g. \"Status=New\""
            ),
            Self::InvalidMode { input } => {
                write!(f, "Invalid match mode '{input}'. Expected 'all' or 'any'")
            }
            Self::UnknownField { input } => write!(
                f,
                "Unknown field '{input}'. Expected one of: Status, Source, Qualification, \
                 Interest Field, Assigned To"
            ),
        }
    }
}

impl std::error::Error for FilterError {}

impl From<FilterError> for LeadTrackError {
    fn from(e: FilterError) -> Self {
        Self::Filter(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to writing leads out.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the output.
    Io { target: String, source: io::Error },

    /// CSV serialisation error.
    Csv { target: String, source: csv::Error },

    /// JSON serialisation error.
    Json {
        target: String,
        source: serde_json::Error,
    },

    /// The requested output format is not one of table, csv, json.
    UnknownFormat { input: String },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { target, source } => write!(f, "Export I/O error '{target}': {source}"),
            Self::Csv { target, source } => write!(f, "CSV export error '{target}': {source}"),
            Self::Json { target, source } => write!(f, "JSON export error '{target}': {source}"),
            Self::UnknownFormat { input } => write!(
                f,
                "Unknown output format '{input}'. Expected 'table', 'csv', or 'json'"
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::UnknownFormat { .. } => None,
        }
    }
}

impl From<ExportError> for LeadTrackError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading. These never abort startup; they
/// are reported as warnings and the defaults are used.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Convenience type alias for LeadTrack results.
pub type Result<T> = std::result::Result<T, LeadTrackError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_store_error_keeps_io_source() {
        let err = LeadTrackError::from(StoreError::Io {
            key: "leads".to_string(),
            path: PathBuf::from("/tmp/leads.json"),
            operation: "read",
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        });
        let store = err.source().expect("top-level error has a source");
        assert!(store.source().is_some(), "io::Error must stay in the chain");
        assert!(err.to_string().contains("leads"));
    }

    #[test]
    fn test_corrupt_value_message_names_key() {
        let err = StoreError::CorruptValue {
            key: "leads".to_string(),
        };
        assert!(err.to_string().contains("'leads'"));
        assert!(err.source().is_none());
    }
}
