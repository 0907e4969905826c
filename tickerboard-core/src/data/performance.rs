//! Trailing performance and per-symbol summaries.

use crate::domain::{PerformanceWindow, PricePoint, SymbolSummary};

/// Percentage change of the latest close vs the close `days_back` points earlier.
///
/// `None` when the series has `days_back` points or fewer, or when either
/// endpoint close is zero.
pub fn performance(series: &[PricePoint], days_back: usize) -> Option<f64> {
    if series.len() <= days_back {
        return None;
    }
    let latest = series[series.len() - 1].close;
    let previous = series[series.len() - 1 - days_back].close;
    if latest == 0.0 || previous == 0.0 {
        return None;
    }
    Some((latest - previous) / previous * 100.0)
}

/// Summarize a series; `None` for an empty series.
pub fn summarize(series: &[PricePoint]) -> Option<SymbolSummary> {
    let latest = series.last()?;
    let window = |w: PerformanceWindow| performance(series, w.days());
    Some(SymbolSummary {
        latest_close: latest.close,
        latest_date: latest.date.clone(),
        performance_7d: window(PerformanceWindow::Days7),
        performance_14d: window(PerformanceWindow::Days14),
        performance_30d: window(PerformanceWindow::Days30),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(closes: &[f64]) -> Vec<PricePoint> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: format!("2024-01-{:02}", i + 1),
                open: None,
                high: None,
                low: None,
                close,
                volume: None,
            })
            .collect()
    }

    #[test]
    fn two_step_performance() {
        let perf = performance(&points(&[100.0, 110.0, 121.0]), 2).unwrap();
        assert!((perf - 21.0).abs() < 1e-9);
    }

    #[test]
    fn needs_days_back_plus_one_points() {
        let series = points(&[100.0, 110.0, 121.0]);
        assert!(performance(&series, 3).is_none());
        assert!(performance(&series, 2).is_some());
        assert!(performance(&[], 0).is_none());
    }

    #[test]
    fn zero_endpoint_is_none() {
        assert!(performance(&points(&[0.0, 5.0]), 1).is_none());
        assert!(performance(&points(&[5.0, 0.0]), 1).is_none());
    }

    #[test]
    fn zero_days_back_is_flat() {
        assert_eq!(performance(&points(&[4.0, 8.0]), 0), Some(0.0));
    }

    #[test]
    fn negative_performance() {
        let perf = performance(&points(&[200.0, 150.0]), 1).unwrap();
        assert!((perf + 25.0).abs() < 1e-9);
    }

    #[test]
    fn summary_windows() {
        let closes: Vec<f64> = (1..=20).map(f64::from).collect();
        let summary = summarize(&points(&closes)).unwrap();
        assert_eq!(summary.latest_close, 20.0);
        assert_eq!(summary.latest_date, "2024-01-20");
        assert!((summary.performance_7d.unwrap() - (20.0 - 13.0) / 13.0 * 100.0).abs() < 1e-9);
        assert!((summary.performance_14d.unwrap() - (20.0 - 6.0) / 6.0 * 100.0).abs() < 1e-9);
        assert!(summary.performance_30d.is_none());
    }

    #[test]
    fn empty_series_has_no_summary() {
        assert!(summarize(&[]).is_none());
    }
}
