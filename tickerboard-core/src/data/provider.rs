//! Quote provider trait and structured error types.
//!
//! The QuoteProvider trait abstracts over the CSV endpoint so the fetch pass
//! can run against a mock in tests.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the fetch side.
///
/// Displayable in both CLI and TUI contexts.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("HTTP {status} for {symbol}")]
    HttpStatus { symbol: String, status: u16 },

    #[error("malformed CSV: {0}")]
    Csv(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl FeedError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

/// A source of daily OHLCV CSV payloads.
///
/// Implementations only fetch text; parsing and persistence live above this trait.
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch the raw CSV body for a (lowercase) symbol.
    fn fetch_csv(&self, symbol: &str) -> Result<String, FeedError>;
}

/// Progress callback for the per-symbol fetch loop.
pub trait FetchProgress {
    /// Called when starting to fetch a symbol.
    fn on_start(&self, symbol: &str, index: usize, total: usize);

    /// Called when a symbol has been written or skipped.
    fn on_complete(&self, symbol: &str, index: usize, total: usize, result: &Result<(), String>);

    /// Called once after the summary file is written.
    fn on_batch_complete(&self, written: usize, skipped: usize, total: usize);
}

/// Progress reporter that emits tracing events.
pub struct LogProgress;

impl FetchProgress for LogProgress {
    fn on_start(&self, symbol: &str, index: usize, total: usize) {
        tracing::info!("[{}/{}] fetching {symbol}", index + 1, total);
    }

    fn on_complete(&self, symbol: &str, _index: usize, _total: usize, result: &Result<(), String>) {
        match result {
            Ok(()) => tracing::debug!(symbol, "series written"),
            Err(reason) => tracing::debug!(symbol, "skipped: {reason}"),
        }
    }

    fn on_batch_complete(&self, written: usize, skipped: usize, total: usize) {
        tracing::info!("fetch complete: {written}/{total} written, {skipped} skipped");
    }
}

/// Progress reporter that ignores everything.
pub struct NoProgress;

impl FetchProgress for NoProgress {
    fn on_start(&self, _symbol: &str, _index: usize, _total: usize) {}
    fn on_complete(&self, _symbol: &str, _index: usize, _total: usize, _result: &Result<(), String>) {}
    fn on_batch_complete(&self, _written: usize, _skipped: usize, _total: usize) {}
}
