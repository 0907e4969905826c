//! Aggregate summary file (`data/summary.json`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Trailing windows computed for every symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PerformanceWindow {
    #[serde(rename = "7")]
    Days7,
    #[serde(rename = "14")]
    Days14,
    #[serde(rename = "30")]
    Days30,
}

impl PerformanceWindow {
    pub const ALL: [PerformanceWindow; 3] = [Self::Days7, Self::Days14, Self::Days30];

    pub fn days(self) -> usize {
        match self {
            Self::Days7 => 7,
            Self::Days14 => 14,
            Self::Days30 => 30,
        }
    }

    pub fn from_days(days: usize) -> Option<Self> {
        match days {
            7 => Some(Self::Days7),
            14 => Some(Self::Days14),
            30 => Some(Self::Days30),
            _ => None,
        }
    }

    /// Cycle used by the range selector.
    pub fn next(self) -> Self {
        match self {
            Self::Days7 => Self::Days14,
            Self::Days14 => Self::Days30,
            Self::Days30 => Self::Days7,
        }
    }

    /// JSON field name of this window in a [`SymbolSummary`].
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Days7 => "performance_7d",
            Self::Days14 => "performance_14d",
            Self::Days30 => "performance_30d",
        }
    }
}

/// Headline numbers for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolSummary {
    #[serde(rename = "latestClose")]
    pub latest_close: f64,
    #[serde(rename = "latestDate")]
    pub latest_date: String,
    #[serde(default)]
    pub performance_7d: Option<f64>,
    #[serde(default)]
    pub performance_14d: Option<f64>,
    #[serde(default)]
    pub performance_30d: Option<f64>,
}

impl SymbolSummary {
    pub fn performance(&self, window: PerformanceWindow) -> Option<f64> {
        let value = match window {
            PerformanceWindow::Days7 => self.performance_7d,
            PerformanceWindow::Days14 => self.performance_14d,
            PerformanceWindow::Days30 => self.performance_30d,
        };
        value.filter(|v| !v.is_nan())
    }
}

/// One fetch pass worth of summaries, keyed by lowercase symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(rename = "lastUpdated")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub symbols: BTreeMap<String, SymbolSummary>,
}

impl Summary {
    pub fn new(last_updated: DateTime<Utc>) -> Self {
        Self {
            last_updated: Some(last_updated),
            symbols: BTreeMap::new(),
        }
    }

    /// Look up a symbol by its lowercase key, then as written.
    pub fn entry(&self, symbol: &str) -> Option<&SymbolSummary> {
        self.symbols
            .get(&symbol.to_lowercase())
            .or_else(|| self.symbols.get(symbol))
    }

    pub fn performance(&self, symbol: &str, window: PerformanceWindow) -> Option<f64> {
        self.entry(symbol).and_then(|s| s.performance(window))
    }
}
