//! Sparkline chart objects and the arena that owns them between rebuilds.

use crate::domain::series::tail;
use crate::domain::PricePoint;

/// Points shown in a card sparkline.
pub const SPARKLINE_POINTS: usize = 20;

/// A card's price line: the last [`SPARKLINE_POINTS`] closes with their dates.
#[derive(Debug, Clone, PartialEq)]
pub struct Sparkline {
    pub key: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Sparkline {
    /// `None` for an empty series: cards without data get no chart.
    pub fn from_series(key: &str, series: &[PricePoint]) -> Option<Self> {
        if series.is_empty() {
            return None;
        }
        let window = tail(series, SPARKLINE_POINTS);
        Some(Self {
            key: key.to_string(),
            labels: window.iter().map(|p| p.date.clone()).collect(),
            values: window.iter().map(|p| p.close).collect(),
        })
    }

    /// `(x, y)` pairs with x as the position in the window.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i as f64, v))
            .collect()
    }

    /// Min and max close, widened when flat so the line sits mid-plot.
    pub fn bounds(&self) -> (f64, f64) {
        let min = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if (max - min).abs() < f64::EPSILON {
            let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.01 };
            (min - pad, max + pad)
        } else {
            (min, max)
        }
    }

    /// Last close minus first close.
    pub fn delta(&self) -> f64 {
        match (self.values.first(), self.values.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }
}

/// Handle to a chart inside the arena's current generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartId {
    generation: u64,
    index: usize,
}

/// Owns every card chart of the current render.
///
/// A rebuild clears the arena before inserting new charts, and ids from an
/// earlier generation no longer resolve.
#[derive(Debug, Default)]
pub struct ChartArena {
    charts: Vec<Sparkline>,
    generation: u64,
}

impl ChartArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every chart and start a new generation.
    pub fn clear(&mut self) {
        let dropped = self.charts.len();
        self.charts.clear();
        self.generation += 1;
        tracing::trace!(dropped, generation = self.generation, "chart arena cleared");
    }

    pub fn insert(&mut self, chart: Sparkline) -> ChartId {
        self.charts.push(chart);
        ChartId {
            generation: self.generation,
            index: self.charts.len() - 1,
        }
    }

    /// Tear down and replace all charts in one step.
    pub fn replace_all(&mut self, charts: impl IntoIterator<Item = Sparkline>) -> Vec<ChartId> {
        self.clear();
        charts.into_iter().map(|chart| self.insert(chart)).collect()
    }

    pub fn get(&self, id: ChartId) -> Option<&Sparkline> {
        if id.generation != self.generation {
            return None;
        }
        self.charts.get(id.index)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(n: usize) -> Vec<PricePoint> {
        (0..n)
            .map(|i| PricePoint {
                date: format!("2024-01-{:02}", i + 1),
                open: None,
                high: None,
                low: None,
                close: 100.0 + i as f64,
                volume: None,
            })
            .collect()
    }

    #[test]
    fn sparkline_keeps_last_twenty() {
        let line = Sparkline::from_series("abc", &series(25)).unwrap();
        assert_eq!(line.values.len(), SPARKLINE_POINTS);
        assert_eq!(line.values[0], 105.0);
        assert_eq!(line.labels.last().unwrap(), "2024-01-25");
        assert_eq!(line.delta(), 19.0);
    }

    #[test]
    fn empty_series_has_no_sparkline() {
        assert!(Sparkline::from_series("abc", &[]).is_none());
    }

    #[test]
    fn flat_line_bounds_are_padded() {
        let line = Sparkline {
            key: "x".into(),
            labels: vec!["a".into(), "b".into()],
            values: vec![50.0, 50.0],
        };
        let (lo, hi) = line.bounds();
        assert!(lo < 50.0 && hi > 50.0);
    }

    #[test]
    fn replace_all_invalidates_old_ids() {
        let mut arena = ChartArena::new();
        let first = arena.replace_all(Sparkline::from_series("a", &series(3)));
        assert_eq!(arena.len(), 1);
        assert!(arena.get(first[0]).is_some());

        let second = arena.replace_all(vec![
            Sparkline::from_series("b", &series(2)).unwrap(),
            Sparkline::from_series("c", &series(2)).unwrap(),
        ]);
        assert_eq!(arena.len(), 2);
        assert!(arena.get(first[0]).is_none());
        assert_eq!(arena.get(second[1]).unwrap().key, "c");
    }

    #[test]
    fn clear_empties_and_advances_generation() {
        let mut arena = ChartArena::new();
        arena.insert(Sparkline::from_series("a", &series(3)).unwrap());
        let before = arena.generation();
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.generation(), before + 1);
    }
}
