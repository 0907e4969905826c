//! Domain types shared by the fetcher and the dashboard.
//!
//! Field names are part of the on-disk JSON contract and must not change.

pub mod series;
pub mod summary;
pub mod symbol;

pub use series::{PricePoint, SymbolSeries};
pub use summary::{PerformanceWindow, Summary, SymbolSummary};
pub use symbol::SymbolConfig;
