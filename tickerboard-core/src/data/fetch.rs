//! Fetch pass: one sequential sweep over the configured symbols.
//!
//! For each symbol: fetch CSV → ingest → write series file. A failure or an
//! empty series skips that symbol only. The summary is written once, after
//! every series file, so it never points at files from a stale prior run.

use super::ingest::parse_price_csv;
use super::performance::summarize;
use super::provider::{FeedError, FetchProgress, QuoteProvider};
use super::store::DataStore;
use crate::domain::{Summary, SymbolConfig, SymbolSeries, SymbolSummary};
use chrono::{DateTime, SubsecRound, Utc};

/// Why a symbol produced no files.
#[derive(Debug)]
pub enum SkipReason {
    /// The endpoint answered but no usable rows survived ingest.
    NoData,
    /// Fetching or parsing failed.
    Fetch(FeedError),
    /// The series file could not be written.
    Write(FeedError),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoData => write!(f, "no data"),
            SkipReason::Fetch(e) => write!(f, "fetch failed: {e}"),
            SkipReason::Write(e) => write!(f, "write failed: {e}"),
        }
    }
}

/// Outcome of a completed fetch pass.
#[derive(Debug)]
pub struct FetchReport {
    pub total: usize,
    pub written: Vec<String>,
    pub skipped: Vec<(String, SkipReason)>,
    pub summary: Summary,
}

impl FetchReport {
    pub fn all_written(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Current UTC time at millisecond precision, as stamped into output files.
pub fn run_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Run one fetch pass.
///
/// Only directory creation and the summary write are fatal; everything
/// per-symbol is recorded in the report.
pub fn run_fetch(
    provider: &dyn QuoteProvider,
    store: &DataStore,
    symbols: &[SymbolConfig],
    progress: &dyn FetchProgress,
) -> Result<FetchReport, FeedError> {
    store.ensure_dir()?;

    let total = symbols.len();
    let updated_at = run_timestamp();
    let mut summary = Summary::new(updated_at);
    let mut written = Vec::new();
    let mut skipped = Vec::new();

    for (i, entry) in symbols.iter().enumerate() {
        let symbol = entry.key();
        progress.on_start(&symbol, i, total);

        let result = fetch_single(provider, store, &symbol, updated_at);
        match result {
            Ok(symbol_summary) => {
                summary.symbols.insert(symbol.clone(), symbol_summary);
                progress.on_complete(&symbol, i, total, &Ok(()));
                written.push(symbol);
            }
            Err(reason) => {
                match &reason {
                    SkipReason::NoData => tracing::warn!(symbol = %symbol, "no usable rows, skipped"),
                    SkipReason::Fetch(e) | SkipReason::Write(e) => {
                        tracing::error!(symbol = %symbol, "error fetching {symbol}: {e}")
                    }
                }
                progress.on_complete(&symbol, i, total, &Err(reason.to_string()));
                skipped.push((symbol, reason));
            }
        }
    }

    let path = store.write_summary(&summary)?;
    tracing::info!(path = %path.display(), symbols = summary.symbols.len(), "summary written");
    progress.on_batch_complete(written.len(), skipped.len(), total);

    Ok(FetchReport {
        total,
        written,
        skipped,
        summary,
    })
}

/// Fetch → ingest → write for one symbol.
fn fetch_single(
    provider: &dyn QuoteProvider,
    store: &DataStore,
    symbol: &str,
    updated_at: DateTime<Utc>,
) -> Result<SymbolSummary, SkipReason> {
    let csv = provider.fetch_csv(symbol).map_err(SkipReason::Fetch)?;
    let points = parse_price_csv(&csv).map_err(SkipReason::Fetch)?;
    let symbol_summary = summarize(&points).ok_or(SkipReason::NoData)?;

    let series = SymbolSeries {
        symbol: symbol.to_string(),
        updated_at,
        series: points,
    };
    store.write_series(&series).map_err(SkipReason::Write)?;
    Ok(symbol_summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::provider::NoProgress;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MockProvider {
        bodies: HashMap<String, Result<String, u16>>,
        calls: Mutex<Vec<String>>,
    }

    impl MockProvider {
        fn new(bodies: &[(&str, Result<&str, u16>)]) -> Self {
            Self {
                bodies: bodies
                    .iter()
                    .map(|(s, b)| (s.to_string(), b.map(String::from)))
                    .collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl QuoteProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        fn fetch_csv(&self, symbol: &str) -> Result<String, FeedError> {
            self.calls.lock().unwrap().push(symbol.to_string());
            match self.bodies.get(symbol) {
                Some(Ok(body)) => Ok(body.clone()),
                Some(Err(status)) => Err(FeedError::HttpStatus {
                    symbol: symbol.into(),
                    status: *status,
                }),
                None => Err(FeedError::NetworkUnreachable("no route".into())),
            }
        }
    }

    fn entry(symbol: &str) -> SymbolConfig {
        SymbolConfig {
            symbol: symbol.into(),
            name: format!("{symbol} Inc"),
            domain: String::new(),
        }
    }

    const CSV: &str = "Date,Open,High,Low,Close,Volume\n2024-01-02,1,1,1,10,5\n2024-01-03,1,1,1,11,5\n";

    #[test]
    fn failures_are_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::new(dir.path());
        let provider = MockProvider::new(&[
            ("aaa", Ok(CSV)),
            ("bbb", Err(500)),
            ("ccc", Ok("No data")),
            ("ddd", Ok(CSV)),
        ]);
        let symbols = ["AAA", "bbb", "ccc", "ddd"].map(entry);

        let report = run_fetch(&provider, &store, &symbols, &NoProgress).unwrap();

        assert_eq!(report.total, 4);
        assert_eq!(report.written, ["aaa", "ddd"]);
        assert_eq!(report.skipped.len(), 2);
        assert!(matches!(report.skipped[0].1, SkipReason::Fetch(_)));
        assert!(matches!(report.skipped[1].1, SkipReason::NoData));
        assert!(!report.all_written());

        assert!(store.has_series("aaa"));
        assert!(!store.has_series("bbb"));
        assert!(!store.has_series("ccc"));

        let summary = store.read_summary().unwrap();
        let keys: Vec<&str> = summary.symbols.keys().map(String::as_str).collect();
        assert_eq!(keys, ["aaa", "ddd"]);
        assert_eq!(summary.symbols["aaa"].latest_close, 11.0);
    }

    #[test]
    fn symbols_are_fetched_sequentially_in_config_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::new(dir.path());
        let provider = MockProvider::new(&[("zz", Ok(CSV)), ("aa", Ok(CSV))]);
        run_fetch(&provider, &store, &[entry("ZZ"), entry("AA")], &NoProgress).unwrap();
        assert_eq!(*provider.calls.lock().unwrap(), ["zz", "aa"]);
    }

    #[test]
    fn series_and_summary_share_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::new(dir.path());
        let provider = MockProvider::new(&[("aaa", Ok(CSV))]);
        let report = run_fetch(&provider, &store, &[entry("aaa")], &NoProgress).unwrap();

        let series = store.read_series("aaa").unwrap();
        assert_eq!(Some(series.updated_at), report.summary.last_updated);
    }

    #[test]
    fn empty_symbol_list_still_writes_summary() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::new(dir.path().join("out"));
        let provider = MockProvider::new(&[]);
        let report = run_fetch(&provider, &store, &[], &NoProgress).unwrap();
        assert!(report.all_written());
        assert!(store.read_summary().unwrap().symbols.is_empty());
    }

    #[test]
    fn unwritable_data_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let store = DataStore::new(blocker.join("data"));
        let provider = MockProvider::new(&[("aaa", Ok(CSV))]);
        assert!(run_fetch(&provider, &store, &[entry("aaa")], &NoProgress).is_err());
    }
}
