//! Fetch side of the system: quote provider, CSV ingest, performance, JSON store.

pub mod fetch;
pub mod ingest;
pub mod performance;
pub mod provider;
pub mod stooq;
pub mod store;

pub use fetch::{run_fetch, FetchReport, SkipReason};
pub use ingest::{csv_to_rows, parse_price_csv, CsvRow};
pub use performance::{performance, summarize};
pub use provider::{FeedError, FetchProgress, LogProgress, NoProgress, QuoteProvider};
pub use stooq::StooqProvider;
pub use store::{load_symbols, DataStore};
