//! Integration tests for the fetch pass against a scripted provider.
//!
//! Everything runs in temp directories; no network.

use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Mutex};
use tickerboard_core::data::{
    load_symbols, run_fetch, DataStore, FeedError, FetchProgress, LogProgress, NoProgress,
    QuoteProvider, SkipReason,
};
use tickerboard_core::domain::{PerformanceWindow, SymbolConfig};

const GOOD_CSV: &str = "Date,Open,High,Low,Close,Volume
2024-01-02,10,11,9,100,1000
2024-01-03,10,11,9,110,1000
2024-01-04,10,11,9,121,1000
";

/// Returns canned bodies; unknown symbols get HTTP 404.
struct ScriptedProvider {
    bodies: HashMap<&'static str, &'static str>,
}

impl QuoteProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn fetch_csv(&self, symbol: &str) -> Result<String, FeedError> {
        self.bodies
            .get(symbol)
            .map(|body| body.to_string())
            .ok_or_else(|| FeedError::HttpStatus {
                symbol: symbol.to_string(),
                status: 404,
            })
    }
}

#[derive(Default)]
struct RecordingProgress {
    events: Mutex<Vec<String>>,
}

impl FetchProgress for RecordingProgress {
    fn on_start(&self, symbol: &str, index: usize, total: usize) {
        self.events
            .lock()
            .unwrap()
            .push(format!("start {symbol} {}/{total}", index + 1));
    }

    fn on_complete(&self, symbol: &str, _index: usize, _total: usize, result: &Result<(), String>) {
        let tag = if result.is_ok() { "ok" } else { "skip" };
        self.events.lock().unwrap().push(format!("{tag} {symbol}"));
    }

    fn on_batch_complete(&self, written: usize, skipped: usize, total: usize) {
        self.events
            .lock()
            .unwrap()
            .push(format!("done {written}/{total} skipped {skipped}"));
    }
}

fn symbols(list: &[&str]) -> Vec<SymbolConfig> {
    list.iter()
        .map(|s| SymbolConfig {
            symbol: s.to_string(),
            name: format!("{s} Corp"),
            domain: String::new(),
        })
        .collect()
}

#[test]
fn mixed_run_writes_good_symbols_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let store = DataStore::new(dir.path().join("data"));
    let provider = ScriptedProvider {
        bodies: HashMap::from([
            ("abc", GOOD_CSV),
            ("empty", "Date,Open,High,Low,Close,Volume\n"),
            ("junk", "Date,Close\n2024-01-02,n/a\n"),
        ]),
    };
    let progress = RecordingProgress::default();

    let report = run_fetch(
        &provider,
        &store,
        &symbols(&["ABC", "EMPTY", "JUNK", "GONE"]),
        &progress,
    )
    .unwrap();

    assert_eq!(report.total, 4);
    assert_eq!(report.written, vec!["abc"]);
    assert_eq!(report.skipped.len(), 3);
    assert!(matches!(report.skipped[0].1, SkipReason::NoData));
    assert!(matches!(report.skipped[1].1, SkipReason::NoData));
    assert!(matches!(
        report.skipped[2].1,
        SkipReason::Fetch(FeedError::HttpStatus { status: 404, .. })
    ));

    assert!(store.has_series("ABC"));
    assert!(!store.has_series("empty"));

    let summary = store.read_summary().unwrap();
    assert_eq!(summary.symbols.len(), 1);
    let abc = summary.entry("ABC").unwrap();
    assert_eq!(abc.latest_close, 121.0);
    assert_eq!(abc.latest_date, "2024-01-04");
    assert_eq!(abc.performance(PerformanceWindow::Days7), None);

    let series = store.read_series("abc").unwrap();
    assert_eq!(series.updated_at, summary.last_updated.unwrap());
    let closes: Vec<f64> = series.series.iter().map(|p| p.close).collect();
    assert_eq!(closes, vec![100.0, 110.0, 121.0]);

    let events = progress.events.lock().unwrap();
    assert_eq!(events.first().unwrap(), "start abc 1/4");
    assert_eq!(events.last().unwrap(), "done 1/4 skipped 3");
}

#[test]
fn rerun_fully_replaces_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let store = DataStore::new(dir.path());

    let first = ScriptedProvider {
        bodies: HashMap::from([("abc", GOOD_CSV), ("xyz", GOOD_CSV)]),
    };
    run_fetch(&first, &store, &symbols(&["abc", "xyz"]), &NoProgress).unwrap();

    let shorter = "Date,Close\n2024-02-01,50\n";
    let second = ScriptedProvider {
        bodies: HashMap::from([("abc", shorter)]),
    };
    run_fetch(&second, &store, &symbols(&["abc", "xyz"]), &NoProgress).unwrap();

    assert_eq!(store.read_series("abc").unwrap().series.len(), 1);
    let summary = store.read_summary().unwrap();
    assert!(summary.entry("xyz").is_none(), "summary is rebuilt, not merged");
}

#[test]
fn symbols_file_round_trips_through_fetch() {
    let dir = tempfile::tempdir().unwrap();
    let config_dir = dir.path().join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    let symbols_path = config_dir.join("symbols.json");
    std::fs::write(
        &symbols_path,
        r#"[{"symbol": "ABC", "name": "Abc Industries", "domain": "abc.com"}]"#,
    )
    .unwrap();

    let symbols = load_symbols(&symbols_path).unwrap();
    assert_eq!(symbols[0].initials(), "AI");

    let store = DataStore::new(dir.path().join("data"));
    let provider = ScriptedProvider {
        bodies: HashMap::from([("abc", GOOD_CSV)]),
    };
    let report = run_fetch(&provider, &store, &symbols, &NoProgress).unwrap();
    assert!(report.all_written());
    assert!(dir.path().join("data/abc.json").exists());
    assert!(dir.path().join("data/summary.json").exists());
}

/// Log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct SharedLog(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn each_skipped_symbol_is_reported_once() {
    let dir = tempfile::tempdir().unwrap();
    let store = DataStore::new(dir.path().join("data"));
    let provider = ScriptedProvider {
        bodies: HashMap::from([("abc", GOOD_CSV), ("empty", "Date,Close\n")]),
    };

    let log = SharedLog::default();
    let sink = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(move || sink.clone())
        .finish();

    let report = tracing::subscriber::with_default(subscriber, || {
        run_fetch(&provider, &store, &symbols(&["abc", "zzz", "empty"]), &LogProgress).unwrap()
    });
    assert_eq!(report.skipped.len(), 2);

    let text = String::from_utf8(log.0.lock().unwrap().clone()).unwrap();
    let problems = |symbol: &str| {
        text.lines()
            .filter(|line| line.contains("WARN") || line.contains("ERROR"))
            .filter(|line| line.contains(symbol))
            .count()
    };
    assert_eq!(problems("zzz"), 1, "{text}");
    assert_eq!(problems("empty"), 1, "{text}");
    assert_eq!(problems("abc"), 0, "{text}");
}
