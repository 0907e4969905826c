//! Daily price points and per-symbol series files (`data/<symbol>.json`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One daily OHLCV row. `close` is always present once a row survives ingest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: String,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: Option<f64>,
}

/// Full price history for one symbol, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolSeries {
    pub symbol: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    pub series: Vec<PricePoint>,
}

impl SymbolSeries {
    pub fn latest(&self) -> Option<&PricePoint> {
        self.series.last()
    }

    /// The trailing `n` points (or fewer if the series is shorter).
    pub fn tail(&self, n: usize) -> &[PricePoint] {
        tail(&self.series, n)
    }
}

/// The trailing `n` elements of a slice.
pub fn tail<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

/// Closing prices of a window, in order.
pub fn closes(points: &[PricePoint]) -> Vec<f64> {
    points.iter().map(|p| p.close).collect()
}
