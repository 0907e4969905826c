//! JSON file store for series and summary files.
//!
//! Layout: `{data_dir}/{symbol}.json` per symbol and `{data_dir}/summary.json`.
//! Every write is a full replace: write to `.tmp`, then rename into place.

use super::provider::FeedError;
use crate::domain::{Summary, SymbolConfig, SymbolSeries};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const SUMMARY_FILE: &str = "summary.json";

/// The on-disk output directory of the fetcher.
#[derive(Debug, Clone)]
pub struct DataStore {
    data_dir: PathBuf,
}

impl DataStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Create the data directory if needed.
    pub fn ensure_dir(&self) -> Result<(), FeedError> {
        fs::create_dir_all(&self.data_dir).map_err(|e| FeedError::io(&self.data_dir, e))
    }

    /// `{data_dir}/{symbol}.json`, symbol lowercased.
    pub fn series_path(&self, symbol: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", symbol.to_lowercase()))
    }

    pub fn summary_path(&self) -> PathBuf {
        self.data_dir.join(SUMMARY_FILE)
    }

    pub fn has_series(&self, symbol: &str) -> bool {
        self.series_path(symbol).is_file()
    }

    pub fn write_series(&self, series: &SymbolSeries) -> Result<PathBuf, FeedError> {
        let path = self.series_path(&series.symbol);
        write_json(&path, series)?;
        Ok(path)
    }

    pub fn read_series(&self, symbol: &str) -> Result<SymbolSeries, FeedError> {
        read_json(&self.series_path(symbol))
    }

    pub fn write_summary(&self, summary: &Summary) -> Result<PathBuf, FeedError> {
        let path = self.summary_path();
        write_json(&path, summary)?;
        Ok(path)
    }

    pub fn read_summary(&self) -> Result<Summary, FeedError> {
        read_json(&self.summary_path())
    }
}

/// Read the configured symbol list.
pub fn load_symbols(path: &Path) -> Result<Vec<SymbolConfig>, FeedError> {
    read_json(path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, FeedError> {
    let content = fs::read_to_string(path).map_err(|e| FeedError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| FeedError::json(path, e))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), FeedError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| FeedError::json(path, e))?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json).map_err(|e| FeedError::io(&tmp_path, e))?;
    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        FeedError::io(path, e)
    })
}
