//! TOML configuration shared by the CLI and the TUI.
//!
//! Every field has a default, so an absent file is a valid configuration.

use crate::dashboard::SortMode;
use crate::data::FeedError;
use crate::domain::PerformanceWindow;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "tickerboard.toml";

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub source: SourceConfig,
    pub dashboard: DashboardConfig,
}

/// Where the fetcher reads symbols and writes output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub symbols: PathBuf,
    pub data_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            symbols: PathBuf::from("config/symbols.json"),
            data_dir: PathBuf::from("data"),
        }
    }
}

/// CSV endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// URL with `{symbol}` and `{interval}` placeholders.
    pub url_template: String,
    pub interval: String,
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url_template: "https://stooq.com/q/d/l/?s={symbol}&i={interval}".into(),
            interval: "d".into(),
            timeout_secs: 30,
        }
    }
}

/// Dashboard defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory or `http(s)://` URL that holds `config/` and `data/`.
    pub base: String,
    /// Trailing range in days: 7, 14 or 30.
    pub default_range: usize,
    pub default_sort: SortMode,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base: ".".into(),
            default_range: 30,
            default_sort: SortMode::Performance,
        }
    }
}

impl DashboardConfig {
    pub fn range(&self) -> PerformanceWindow {
        PerformanceWindow::from_days(self.default_range).unwrap_or(PerformanceWindow::Days30)
    }
}

impl AppConfig {
    /// Parse a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, FeedError> {
        let config: Self =
            toml::from_str(content).map_err(|e| FeedError::Config(format!("parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn from_file(path: &Path) -> Result<Self, FeedError> {
        let content = std::fs::read_to_string(path).map_err(|e| FeedError::io(path, e))?;
        Self::from_toml(&content)
    }

    /// Load `path` if it exists, otherwise use defaults. A malformed file is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, FeedError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<(), FeedError> {
        if !self.source.url_template.contains("{symbol}") {
            return Err(FeedError::Config(
                "source.url_template must contain {symbol}".into(),
            ));
        }
        if PerformanceWindow::from_days(self.dashboard.default_range).is_none() {
            return Err(FeedError::Config(format!(
                "dashboard.default_range must be 7, 14 or 30 (got {})",
                self.dashboard.default_range
            )));
        }
        if self.source.timeout_secs == 0 {
            return Err(FeedError::Config("source.timeout_secs must be positive".into()));
        }
        Ok(())
    }
}
