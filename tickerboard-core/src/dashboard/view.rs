//! Filter, sort and card pipeline, re-run on every control change.

use super::card::CardView;
use super::chart::{ChartArena, Sparkline};
use super::loader::DashboardData;
use crate::domain::{PerformanceWindow, Summary, SymbolConfig};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Shown instead of the grid when the search leaves nothing.
pub const EMPTY_PLACEHOLDER: &str = "No symbols match the current search.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Performance,
    Name,
}

impl SortMode {
    pub fn toggle(self) -> Self {
        match self {
            SortMode::Performance => SortMode::Name,
            SortMode::Name => SortMode::Performance,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortMode::Performance => "Performance",
            SortMode::Name => "Name",
        }
    }
}

/// The three user controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewControls {
    pub search: String,
    pub sort: SortMode,
    pub range: PerformanceWindow,
}

impl Default for ViewControls {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: SortMode::Performance,
            range: PerformanceWindow::Days30,
        }
    }
}

/// Case-insensitive substring match against `"{name} {symbol}"`. An empty query matches everything.
pub fn matches_search(entry: &SymbolConfig, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    format!("{} {}", entry.name, entry.symbol)
        .to_lowercase()
        .contains(&query.to_lowercase())
}

pub fn filter_entries<'a>(symbols: &'a [SymbolConfig], query: &str) -> Vec<&'a SymbolConfig> {
    symbols
        .iter()
        .filter(|entry| matches_search(entry, query))
        .collect()
}

/// Stable sort. By name: ascending, case-insensitive. By performance:
/// descending for `range`, entries without a value last.
pub fn sort_entries(
    entries: &mut [&SymbolConfig],
    sort: SortMode,
    range: PerformanceWindow,
    summary: &Summary,
) {
    match sort {
        SortMode::Name => entries.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        }),
        SortMode::Performance => entries.sort_by(|a, b| {
            let pa = summary.performance(&a.symbol, range);
            let pb = summary.performance(&b.symbol, range);
            match (pa, pb) {
                (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }),
    }
}

/// Result of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    pub cards: Vec<CardView>,
}

impl GridView {
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_PLACEHOLDER)
    }
}

/// Filter, sort and build cards, replacing every chart in `arena`.
pub fn rebuild(data: &DashboardData, controls: &ViewControls, arena: &mut ChartArena) -> GridView {
    let mut entries = filter_entries(&data.symbols, &controls.search);
    sort_entries(&mut entries, controls.sort, controls.range, &data.summary);

    arena.clear();
    let cards = entries
        .into_iter()
        .map(|entry| {
            let mut card = CardView::build(entry, data, controls.range);
            card.chart = Sparkline::from_series(&card.key, data.points(entry))
                .map(|line| arena.insert(line));
            card
        })
        .collect();

    GridView { cards }
}
