//! Detail view for one symbol: forecast chart data and recent activity.

use super::card::format_percent;
use crate::domain::{PerformanceWindow, PricePoint, Summary, SymbolConfig};
use crate::forecast::{recent_activity, ForecastOutcome, RecentRow, FORECAST_DAYS, FORECAST_WINDOW};

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub title: String,
    pub subtitle: String,
    /// Favicon URL derived from the symbol's domain.
    pub logo: Option<String>,
    pub range: PerformanceWindow,
    /// Summary performance for `range`.
    pub performance: Option<f64>,
    /// Dates of the history window.
    pub history_labels: Vec<String>,
    pub outcome: ForecastOutcome,
    pub recent: Vec<RecentRow>,
}

impl DetailView {
    pub fn build(
        entry: &SymbolConfig,
        series: &[PricePoint],
        summary: &Summary,
        range: PerformanceWindow,
    ) -> Self {
        let window = crate::domain::series::tail(series, FORECAST_WINDOW);
        Self {
            title: entry.name.clone(),
            subtitle: entry.display_symbol(),
            logo: entry.logo_url(),
            range,
            performance: summary.performance(&entry.symbol, range),
            history_labels: window.iter().map(|p| p.date.clone()).collect(),
            outcome: ForecastOutcome::for_series(series),
            recent: recent_activity(series),
        }
    }

    /// History dates followed by `+1..+7`.
    pub fn labels(&self) -> Vec<String> {
        self.history_labels
            .iter()
            .cloned()
            .chain((1..=FORECAST_DAYS).map(|i| format!("+{i}")))
            .collect()
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Expected change ({FORECAST_DAYS}d): {} | Volatility: {:.2}%",
            format_percent(Some(self.outcome.change_pct)),
            self.outcome.volatility * 100.0
        )
    }

    pub fn has_history(&self) -> bool {
        !self.outcome.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SymbolSummary;
    use chrono::Utc;

    fn series(closes: &[f64]) -> Vec<PricePoint> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: format!("2024-02-{:02}", i + 1),
                open: None,
                high: None,
                low: None,
                close,
                volume: None,
            })
            .collect()
    }

    #[test]
    fn builds_titles_and_labels() {
        let entry = SymbolConfig {
            symbol: "nvda".into(),
            name: "Nvidia".into(),
            domain: "nvidia.com".into(),
        };
        let mut summary = Summary::new(Utc::now());
        summary.symbols.insert(
            "nvda".into(),
            SymbolSummary {
                latest_close: 3.0,
                latest_date: "2024-02-03".into(),
                performance_7d: Some(1.5),
                performance_14d: None,
                performance_30d: None,
            },
        );
        let view = DetailView::build(&entry, &series(&[1.0, 2.0, 3.0]), &summary, PerformanceWindow::Days7);

        assert_eq!(view.title, "Nvidia");
        assert_eq!(view.subtitle, "NVDA");
        assert!(view.logo.as_deref().is_some_and(|url| url.contains("nvidia.com")));
        assert_eq!(view.performance, Some(1.5));
        let labels = view.labels();
        assert_eq!(labels.len(), 3 + FORECAST_DAYS);
        assert_eq!(labels[3], "+1");
        assert_eq!(view.recent.len(), 3);
        assert!(view.summary_line().starts_with("Expected change (7d): 233.33%"));
    }

    #[test]
    fn empty_series_still_builds() {
        let entry = SymbolConfig {
            symbol: "X".into(),
            name: "X".into(),
            domain: String::new(),
        };
        let view = DetailView::build(&entry, &[], &Summary::new(Utc::now()), PerformanceWindow::Days30);
        assert!(!view.has_history());
        assert!(view.logo.is_none());
        assert_eq!(view.summary_line(), "Expected change (7d): 0.00% | Volatility: 0.00%");
    }
}
