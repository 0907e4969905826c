//! CSV ingest: header-keyed rows → normalized price points.
//!
//! Header names are matched case-insensitively. Numeric cells that do not
//! parse to a finite number become `None`; rows without a date or a close are
//! dropped. The result is sorted by date with repeated dates removed.

use super::provider::FeedError;
use crate::domain::PricePoint;
use std::collections::HashMap;

/// One data row keyed by lowercase header name. Short rows simply lack keys.
pub type CsvRow = HashMap<String, String>;

/// Split CSV text into header-keyed rows.
///
/// Input with fewer than two non-empty lines yields no rows.
pub fn csv_to_rows(text: &str) -> Result<Vec<CsvRow>, FeedError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.trim().as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| FeedError::Csv(e.to_string()))?
        .iter()
        .map(|h| h.to_lowercase())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| FeedError::Csv(e.to_string()))?;
        let row: CsvRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.clone(), value.to_string()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Parse a cell as a finite number.
pub fn to_number(value: Option<&str>) -> Option<f64> {
    value
        .map(str::trim)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Convert rows to price points, dropping rows with no date or no close.
pub fn rows_to_points(rows: &[CsvRow]) -> Vec<PricePoint> {
    rows.iter()
        .filter_map(|row| {
            let date = row.get("date").map(|d| d.trim()).filter(|d| !d.is_empty())?;
            let field = |name: &str| to_number(row.get(name).map(String::as_str));
            Some(PricePoint {
                date: date.to_string(),
                open: field("open"),
                high: field("high"),
                low: field("low"),
                close: field("close")?,
                volume: field("volume"),
            })
        })
        .collect()
}

/// Sort by date (stable) and keep the first point of any repeated date.
pub fn canonicalize(mut points: Vec<PricePoint>) -> Vec<PricePoint> {
    points.sort_by(|a, b| a.date.cmp(&b.date));
    points.dedup_by(|later, earlier| later.date == earlier.date);
    points
}

/// Full ingest: CSV text → ordered, filtered price points.
pub fn parse_price_csv(text: &str) -> Result<Vec<PricePoint>, FeedError> {
    let rows = csv_to_rows(text)?;
    Ok(canonicalize(rows_to_points(&rows)))
}
