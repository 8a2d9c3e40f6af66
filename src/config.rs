use std::path::PathBuf;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::core::sheet::{ClassificationPolicy, SanitizerConfig};

/// Prefix for environment overrides, e.g. `SHEETVIEW_SOURCE__BASE_URL`.
pub const ENV_PREFIX: &str = "SHEETVIEW_";

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub source: SourceConfig,
    pub classification: ClassificationPolicy,
    pub sanitizer: SanitizerConfig,
    pub logging: LoggingConfig,
}

/// Where the exported snapshot is read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL to fetch from. When unset, `path` is read from disk.
    pub base_url: Option<String>,
    /// Document path, relative to `base_url` when fetching.
    pub path: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

/// Logging output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub filter: String,
    /// Emit JSON lines on stdout instead of pretty output.
    pub json: bool,
    /// Also write daily-rolling JSON logs into this directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            path: "importData.json".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
            log_dir: None,
        }
    }
}

impl ViewerConfig {
    /// Load configuration from `~/.config/sheetview/config.toml` with
    /// environment overrides.
    /// Returns `Default` if extraction fails.
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match Self::figment(&config_path).extract() {
            Ok(config) => {
                log::info!("Loaded config from {}", config_path.display());
                config
            }
            Err(e) => {
                log::warn!(
                    "Failed to load config at {}: {e} - using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Defaults, then the TOML file (if present), then `SHEETVIEW_*` variables.
    pub fn figment(config_path: &std::path::Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("sheetview").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
