//! Parallel dashboard load: symbol list and summary, then every series.

use super::source::{read_json, series_path, DashboardSource, SourceError, SUMMARY_PATH, SYMBOLS_PATH};
use crate::domain::{PricePoint, Summary, SymbolConfig, SymbolSeries};
use rayon::prelude::*;
use std::collections::HashMap;
use thiserror::Error;

/// The one failure that replaces the whole grid.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("Failed to load symbol list: {0}")]
    Symbols(SourceError),
    #[error("Failed to load summary: {0}")]
    Summary(SourceError),
}

/// Per-symbol series after loading. Only `Loaded` carries points.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesSlot {
    Loaded(SymbolSeries),
    /// No series file exists for the symbol.
    Missing,
    /// The file exists but could not be read or decoded.
    Unavailable(String),
}

impl SeriesSlot {
    pub fn points(&self) -> &[PricePoint] {
        match self {
            SeriesSlot::Loaded(series) => &series.series,
            SeriesSlot::Missing | SeriesSlot::Unavailable(_) => &[],
        }
    }
}

/// Everything the dashboard renders from.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub symbols: Vec<SymbolConfig>,
    pub summary: Summary,
    /// Keyed by lowercase symbol.
    pub series: HashMap<String, SeriesSlot>,
}

impl DashboardData {
    pub fn slot(&self, entry: &SymbolConfig) -> Option<&SeriesSlot> {
        self.series.get(&entry.key())
    }

    /// Points for `entry`, empty when the series did not load.
    pub fn points(&self, entry: &SymbolConfig) -> &[PricePoint] {
        self.slot(entry).map(SeriesSlot::points).unwrap_or(&[])
    }

    /// Symbols whose series did not load cleanly, with the reason.
    pub fn degraded(&self) -> Vec<(String, String)> {
        let mut out: Vec<(String, String)> = self
            .symbols
            .iter()
            .filter_map(|entry| match self.slot(entry) {
                Some(SeriesSlot::Unavailable(reason)) => Some((entry.key(), reason.clone())),
                _ => None,
            })
            .collect();
        out.sort();
        out
    }
}

/// Load the symbol list and summary concurrently, then every series in parallel.
///
/// Only the list and summary are fatal. A series that is absent or broken
/// becomes [`SeriesSlot::Missing`] or [`SeriesSlot::Unavailable`].
pub fn load_dashboard(source: &dyn DashboardSource) -> Result<DashboardData, LoadError> {
    let (symbols, summary) = rayon::join(
        || read_json::<Vec<SymbolConfig>>(source, SYMBOLS_PATH),
        || read_json::<Summary>(source, SUMMARY_PATH),
    );
    let symbols = symbols.map_err(LoadError::Symbols)?;
    let summary = summary.map_err(LoadError::Summary)?;

    let series: HashMap<String, SeriesSlot> = symbols
        .par_iter()
        .map(|entry| {
            let key = entry.key();
            let slot = load_series(source, &key);
            (key, slot)
        })
        .collect();

    let loaded = series
        .values()
        .filter(|slot| matches!(slot, SeriesSlot::Loaded(_)))
        .count();
    tracing::info!(
        source = %source.describe(),
        symbols = symbols.len(),
        loaded,
        "dashboard loaded"
    );

    Ok(DashboardData {
        symbols,
        summary,
        series,
    })
}

fn load_series(source: &dyn DashboardSource, key: &str) -> SeriesSlot {
    match read_json::<SymbolSeries>(source, &series_path(key)) {
        Ok(series) => SeriesSlot::Loaded(series),
        Err(SourceError::NotFound(_)) => {
            tracing::debug!(symbol = key, "no series file");
            SeriesSlot::Missing
        }
        Err(SourceError::Other(reason)) => {
            tracing::warn!(symbol = key, %reason, "series unavailable");
            SeriesSlot::Unavailable(reason)
        }
    }
}
