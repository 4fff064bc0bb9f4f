//! User configuration persisted as JSON.

use crate::analysis::Analysis;
use crate::charts::ChartStyle;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "SALES_LENS_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "sales_lens.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to access config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP client timeout for URL loads.
    pub http_timeout_secs: u64,
    /// Rows shown in the data preview after a load.
    pub preview_rows: usize,
    pub export_width: u32,
    pub export_height: u32,
    pub default_analysis: Analysis,
    pub default_chart: ChartStyle,
    pub last_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: 30,
            preview_rows: 5,
            export_width: 1000,
            export_height: 700,
            default_analysis: Analysis::SizeCounts,
            default_chart: ChartStyle::Bar,
            last_url: String::new(),
        }
    }
}

impl AppConfig {
    /// Config path from the environment, else `sales_lens.json` in the working directory.
    pub fn resolve_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Read a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&content).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Like [`AppConfig::load`], but falls back to defaults on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!(error = %e, "ignoring unreadable config");
            Self::default()
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = AppConfig {
            default_analysis: Analysis::TopStates,
            default_chart: ChartStyle::Pie,
            last_url: "https://example.com/sales.csv".to_string(),
            ..AppConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(AppConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "preview_rows": 12 }"#).unwrap();
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.preview_rows, 12);
        assert_eq!(config.http_timeout_secs, 30);
        assert_eq!(config.default_chart, ChartStyle::Bar);
    }

    #[test]
    fn malformed_file_is_an_error_but_load_or_default_recovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Json { .. })
        ));
        assert_eq!(AppConfig::load_or_default(&path), AppConfig::default());
    }
}
