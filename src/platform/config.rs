// LeadTrack - platform/config.rs
//
// Platform data/config directory resolution and config.toml loading with
// startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::seed::SeedPolicy;
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for LeadTrack data and configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/leadtrack/).
    pub config_dir: PathBuf,

    /// Data directory holding the key-value store.
    pub data_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to the current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            let data_dir = proj_dirs.data_dir().to_path_buf();

            tracing::debug!(
                config = %config_dir.display(),
                data = %data_dir.display(),
                "Platform paths resolved"
            );

            Self {
                config_dir,
                data_dir,
            }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            let fallback = PathBuf::from(".");
            Self {
                config_dir: fallback.clone(),
                data_dir: fallback,
            }
        }
    }

    /// Directory of the key-value store inside `data_dir`.
    pub fn store_dir(data_dir: &Path) -> PathBuf {
        data_dir.join(constants::STORE_DIR_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are ignored so a newer config file still works with an
/// older binary.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub store: StoreSection,
    pub leads: LeadsSection,
    pub output: OutputSection,
    pub logging: LoggingSection,
}

/// `[store]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// Data directory override.
    pub data_dir: Option<String>,
}

/// `[leads]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LeadsSection {
    /// Append the sample leads in the Leads view.
    pub seed_in_leads_view: Option<bool>,
    /// Append the sample leads in the Filter view.
    pub seed_in_filter_view: Option<bool>,
}

/// `[output]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// "table", "csv" or "json".
    pub default_format: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "csv" => Some(OutputFormat::Csv),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce warnings and fall back to defaults.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Data directory override. `None` = platform default.
    pub data_dir: Option<PathBuf>,

    /// Which views include the sample leads.
    pub seed_policy: SeedPolicy,

    /// Output format when the command line does not pick one.
    pub output_format: OutputFormat,

    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,

    /// Log file path.
    pub log_file: Option<String>,
}

/// Path of config.toml for a given config directory.
pub fn config_path(config_dir: &Path) -> PathBuf {
    config_dir.join(constants::CONFIG_FILE_NAME)
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns the validated config and a list of non-fatal warnings. A missing
/// file yields defaults with no warnings; an unreadable or unparseable file
/// yields defaults with a warning so the application still starts.
///
/// This runs before logging is initialised (the config may set the level),
/// so problems are returned rather than logged.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let path = config_path(config_dir);
    let mut warnings: Vec<String> = Vec::new();

    if !path.exists() {
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => {
            let err = ConfigError::Io { path, source: e };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let err = ConfigError::TomlParse { path, source: e };
            warnings.push(format!("{err}. Using defaults."));
            return (AppConfig::default(), warnings);
        }
    };

    (validate(raw, &mut warnings), warnings)
}

/// Turn a parsed config into an `AppConfig`, collecting a warning for every
/// rejected value.
pub fn validate(raw: RawConfig, warnings: &mut Vec<String>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- Store: data_dir --
    if let Some(dir) = raw.store.data_dir {
        if dir.trim().is_empty() {
            warnings.push("[store] data_dir is empty. Using the platform default.".to_string());
        } else {
            config.data_dir = Some(PathBuf::from(dir));
        }
    }

    // -- Leads: seed policy --
    if let Some(include) = raw.leads.seed_in_leads_view {
        config.seed_policy.leads_view = include;
    }
    if let Some(include) = raw.leads.seed_in_filter_view {
        config.seed_policy.filter_view = include;
    }

    // -- Output: default_format --
    if let Some(ref format) = raw.output.default_format {
        match OutputFormat::parse(format) {
            Some(f) => config.output_format = f,
            None => warnings.push(format!(
                "[output] default_format = \"{format}\" is not recognised. \
                 Expected \"table\", \"csv\" or \"json\". Using default (table).",
            )),
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            warnings.push(format!(
                "[logging] level = \"{level}\" is not recognised. \
                 Valid values: error, warn, info, debug, trace. Using default (info).",
            ));
        }
    }

    // -- Logging: file --
    if let Some(file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(file);
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert_eq!(config.seed_policy, SeedPolicy::default());
        assert_eq!(config.output_format, OutputFormat::Table);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_valid_config_is_applied() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            config_path(dir.path()),
            r#"
[store]
data_dir = "/var/lib/leadtrack"

[leads]
seed_in_leads_view = false
seed_in_filter_view = true

[output]
default_format = "JSON"

[logging]
level = "Debug"
file = "/tmp/leadtrack.log"

[future_section]
anything = 1
"#,
        )
        .unwrap();

        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.data_dir, Some(PathBuf::from("/var/lib/leadtrack")));
        assert!(!config.seed_policy.leads_view);
        assert!(config.seed_policy.filter_view);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.log_file.as_deref(), Some("/tmp/leadtrack.log"));
    }

    #[test]
    fn test_invalid_values_warn_and_fall_back() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            config_path(dir.path()),
            "[output]\ndefault_format = \"xml\"\n[logging]\nlevel = \"loud\"\n",
        )
        .unwrap();

        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 2);
        assert_eq!(config.output_format, OutputFormat::Table);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_unparseable_config_warns() {
        let dir = TempDir::new().unwrap();
        std::fs::write(config_path(dir.path()), "not = [valid toml").unwrap();
        let (config, warnings) = load_config(dir.path());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Config parse error"));
        assert_eq!(config.seed_policy, SeedPolicy::default());
    }
}
