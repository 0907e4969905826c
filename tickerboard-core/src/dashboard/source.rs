//! Where the dashboard reads its JSON files from.
//!
//! The same relative paths work against a local directory and a static HTTP
//! server, so the fetcher's output can be served as-is.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const SYMBOLS_PATH: &str = "config/symbols.json";
pub const SUMMARY_PATH: &str = "data/summary.json";

/// Relative path of one symbol's series file.
pub fn series_path(key: &str) -> String {
    format!("data/{key}.json")
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Other(String),
}

/// Read-only access to the fetcher's output tree.
pub trait DashboardSource: Send + Sync {
    /// Human-readable location, shown in the header and logs.
    fn describe(&self) -> String;

    /// Fetch a file as text by its path relative to the base.
    fn read(&self, rel_path: &str) -> Result<String, SourceError>;
}

/// Read and decode a JSON file. Decode failures are reported as `Other`.
pub fn read_json<T: DeserializeOwned>(
    source: &dyn DashboardSource,
    rel_path: &str,
) -> Result<T, SourceError> {
    let text = source.read(rel_path)?;
    serde_json::from_str(&text).map_err(|e| SourceError::Other(format!("{rel_path}: {e}")))
}

/// Files under a local directory.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DashboardSource for DirSource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn read(&self, rel_path: &str) -> Result<String, SourceError> {
        let path = self.root.join(rel_path);
        std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SourceError::NotFound(rel_path.to_string()),
            _ => SourceError::Other(format!("{}: {e}", path.display())),
        })
    }
}

/// Files served over HTTP below a base URL.
pub struct HttpSource {
    base: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(base: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Other(format!("HTTP client: {e}")))?;
        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn url_for(&self, rel_path: &str) -> String {
        format!("{}/{}", self.base, rel_path.trim_start_matches('/'))
    }
}

impl DashboardSource for HttpSource {
    fn describe(&self) -> String {
        self.base.clone()
    }

    fn read(&self, rel_path: &str) -> Result<String, SourceError> {
        let url = self.url_for(rel_path);
        tracing::debug!(%url, "dashboard request");
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| SourceError::Other(format!("{url}: {e}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(rel_path.to_string()));
        }
        if !status.is_success() {
            return Err(SourceError::Other(format!(
                "Failed to load {rel_path}: HTTP {}",
                status.as_u16()
            )));
        }
        response
            .text()
            .map_err(|e| SourceError::Other(format!("{url}: {e}")))
    }
}

/// Pick a source for `base`: `http://` or `https://` means HTTP, anything else a directory.
pub fn open_source(
    base: &str,
    timeout: Duration,
) -> Result<Box<dyn DashboardSource>, SourceError> {
    if base.starts_with("http://") || base.starts_with("https://") {
        Ok(Box::new(HttpSource::new(base, timeout)?))
    } else {
        Ok(Box::new(DirSource::new(base)))
    }
}
