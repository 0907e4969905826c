//! One grid card per symbol.

use super::chart::ChartId;
use super::loader::{DashboardData, SeriesSlot};
use crate::domain::{PerformanceWindow, SymbolConfig};

/// Placeholder for absent numbers.
pub const MISSING: &str = "—";

/// Two decimals, or `—`.
pub fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("{v:.2}"),
        _ => MISSING.to_string(),
    }
}

/// Two decimals with a percent sign, or `—`.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("{v:.2}%"),
        _ => MISSING.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    Neutral,
    Positive,
    Negative,
}

/// Colored performance label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub kind: BadgeKind,
    pub text: String,
}

impl Badge {
    /// Zero counts as positive.
    pub fn for_performance(value: Option<f64>) -> Self {
        match value.filter(|v| !v.is_nan()) {
            None => Self {
                kind: BadgeKind::Neutral,
                text: "No data".to_string(),
            },
            Some(v) if v >= 0.0 => Self {
                kind: BadgeKind::Positive,
                text: format!("▲ {}", format_percent(Some(v))),
            },
            Some(v) => Self {
                kind: BadgeKind::Negative,
                text: format!("▼ {}", format_percent(Some(v))),
            },
        }
    }
}

/// What the card says about its series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeriesStatus {
    Points(usize),
    NoData,
    Unavailable(String),
}

impl SeriesStatus {
    fn from_slot(slot: Option<&SeriesSlot>) -> Self {
        match slot {
            Some(SeriesSlot::Loaded(series)) if !series.series.is_empty() => {
                SeriesStatus::Points(series.series.len())
            }
            Some(SeriesSlot::Unavailable(reason)) => SeriesStatus::Unavailable(reason.clone()),
            _ => SeriesStatus::NoData,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeriesStatus::Points(_) => "",
            SeriesStatus::NoData => "no data",
            SeriesStatus::Unavailable(_) => "unavailable",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub key: String,
    pub symbol: String,
    pub name: String,
    pub initials: String,
    pub latest_close: Option<f64>,
    pub latest_date: Option<String>,
    pub performance: Option<f64>,
    pub badge: Badge,
    pub status: SeriesStatus,
    pub chart: Option<ChartId>,
}

impl CardView {
    /// Latest close and date come from the summary, falling back to the last series point.
    pub fn build(entry: &SymbolConfig, data: &DashboardData, range: PerformanceWindow) -> Self {
        let points = data.points(entry);
        let summary = data.summary.entry(&entry.symbol);
        let last = points.last();
        let performance = summary.and_then(|s| s.performance(range));

        Self {
            key: entry.key(),
            symbol: entry.display_symbol(),
            name: entry.name.clone(),
            initials: entry.initials(),
            latest_close: summary.map(|s| s.latest_close).or(last.map(|p| p.close)),
            latest_date: summary
                .map(|s| s.latest_date.clone())
                .or_else(|| last.map(|p| p.date.clone())),
            performance,
            badge: Badge::for_performance(performance),
            status: SeriesStatus::from_slot(data.slot(entry)),
            chart: None,
        }
    }

    pub fn close_text(&self) -> String {
        format_number(self.latest_close)
    }

    pub fn date_text(&self) -> &str {
        self.latest_date.as_deref().unwrap_or(MISSING)
    }
}
