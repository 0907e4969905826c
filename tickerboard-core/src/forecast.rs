//! Forecast math for the detail view: OLS trend, return volatility, band.
//!
//! All functions are pure and operate on closing prices in chronological order.

use crate::domain::PricePoint;

/// Points fed into the regression.
pub const FORECAST_WINDOW: usize = 30;
/// Points projected past the window.
pub const FORECAST_DAYS: usize = 7;
/// Rows in the recent-activity table.
pub const RECENT_ROWS: usize = 10;

/// `close = intercept + slope * index`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
}

impl Regression {
    pub fn at(&self, index: f64) -> f64 {
        self.intercept + self.slope * index
    }
}

/// Ordinary least squares over index positions `0..n`.
///
/// A degenerate fit (no points, or zero variance in the index) has slope 0.
pub fn regression(values: &[f64]) -> Regression {
    let n = values.len();
    if n == 0 {
        return Regression {
            slope: 0.0,
            intercept: 0.0,
        };
    }
    let nf = n as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2) = (0.0, 0.0, 0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_x2 += x * x;
    }
    let denominator = nf * sum_x2 - sum_x * sum_x;
    let slope = if denominator == 0.0 {
        0.0
    } else {
        (nf * sum_xy - sum_x * sum_y) / denominator
    };
    let intercept = (sum_y - slope * sum_x) / nf;
    Regression { slope, intercept }
}

/// Project `days` points past the end of `values`.
///
/// Point `i` (1-based) sits at index `n - 1 + i`; an empty window extrapolates from 0.
pub fn forecast(values: &[f64], days: usize) -> Vec<f64> {
    let fit = regression(values);
    let n = values.len();
    (1..=days).map(|i| fit.at((n + i - 1) as f64)).collect()
}

/// Sample standard deviation of simple day-over-day returns.
///
/// Steps from a zero close are skipped; fewer than two usable returns give 0.
pub fn volatility(values: &[f64]) -> f64 {
    let returns: Vec<f64> = values
        .windows(2)
        .filter(|w| w[0] != 0.0)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect();
    if returns.len() < 2 {
        return 0.0;
    }
    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Proportional envelope around one forecast value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub lower: f64,
    pub upper: f64,
}

pub fn band(value: f64, volatility: f64) -> Band {
    Band {
        lower: value * (1.0 - volatility),
        upper: value * (1.0 + volatility),
    }
}

/// Percent move from the last actual close to the last forecast point.
pub fn forecast_change(last_actual: f64, last_forecast: f64) -> f64 {
    if last_actual == 0.0 {
        0.0
    } else {
        (last_forecast - last_actual) / last_actual * 100.0
    }
}

/// Everything the detail chart needs for one window.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastOutcome {
    pub history: Vec<f64>,
    pub forecast: Vec<f64>,
    pub bands: Vec<Band>,
    pub volatility: f64,
    pub change_pct: f64,
}

impl ForecastOutcome {
    /// Forecast the trailing [`FORECAST_WINDOW`] closes of `series`.
    pub fn for_series(series: &[PricePoint]) -> Self {
        let window = crate::domain::series::tail(series, FORECAST_WINDOW);
        Self::from_closes(crate::domain::series::closes(window))
    }

    pub fn from_closes(history: Vec<f64>) -> Self {
        let projected = forecast(&history, FORECAST_DAYS);
        let vol = volatility(&history);
        let last_actual = history.last().copied().unwrap_or(0.0);
        let last_forecast = projected.last().copied().unwrap_or(last_actual);
        Self {
            bands: projected.iter().map(|&v| band(v, vol)).collect(),
            change_pct: forecast_change(last_actual, last_forecast),
            volatility: vol,
            forecast: projected,
            history,
        }
    }
}

/// One row of the recent-activity table.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentRow {
    pub date: String,
    pub close: f64,
    pub change_pct: f64,
}

/// The last `RECENT_ROWS` points, newest first, with day-over-day change.
///
/// The oldest point of the series has no predecessor and shows 0.
pub fn recent_activity(series: &[PricePoint]) -> Vec<RecentRow> {
    let start = series.len().saturating_sub(RECENT_ROWS);
    (start..series.len())
        .rev()
        .map(|i| {
            let point = &series[i];
            let prev = if i == 0 { point.close } else { series[i - 1].close };
            RecentRow {
                date: point.date.clone(),
                close: point.close,
                change_pct: forecast_change(prev, point.close),
            }
        })
        .collect()
}
