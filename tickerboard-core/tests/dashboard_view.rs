//! Dashboard loading from a directory plus the filter/sort/card pipeline.

use std::path::Path;
use tickerboard_core::dashboard::{
    load_dashboard, rebuild, BadgeKind, ChartArena, DetailView, DirSource, LoadError,
    SeriesStatus, SortMode, SourceError, ViewControls,
};
use tickerboard_core::domain::PerformanceWindow;

fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, body).unwrap();
}

fn series_json(symbol: &str, closes: &[f64]) -> String {
    let points: Vec<String> = closes
        .iter()
        .enumerate()
        .map(|(i, c)| {
            format!(
                r#"{{"date": "2024-03-{:02}", "open": null, "high": null, "low": null, "close": {c}, "volume": null}}"#,
                i + 1
            )
        })
        .collect();
    format!(
        r#"{{"symbol": "{symbol}", "updatedAt": "2024-04-01T06:00:00.000Z", "series": [{}]}}"#,
        points.join(",")
    )
}

/// Three symbols: one complete, one without a series file, one with a broken file.
fn fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        root,
        "config/symbols.json",
        r#"[
            {"symbol": "ABC", "name": "Abc Holdings", "domain": "abc.com"},
            {"symbol": "LMN", "name": "lmn partners", "domain": ""},
            {"symbol": "XYZ", "name": "Xyz Labs", "domain": "xyz.io"}
        ]"#,
    );
    write(
        root,
        "data/summary.json",
        r#"{
            "lastUpdated": "2024-04-01T06:00:00.000Z",
            "symbols": {
                "abc": {"latestClose": 25.0, "latestDate": "2024-03-25",
                        "performance_7d": -1.5, "performance_14d": 2.0, "performance_30d": 5.25},
                "xyz": {"latestClose": 9.5, "latestDate": "2024-03-25",
                        "performance_7d": 3.0, "performance_14d": null, "performance_30d": null}
            }
        }"#,
    );
    let closes: Vec<f64> = (1..=25).map(f64::from).collect();
    write(root, "data/abc.json", &series_json("ABC", &closes));
    write(root, "data/xyz.json", "{ truncated");
    dir
}

#[test]
fn abc_with_positive_thirty_day_performance_gets_up_badge() {
    let dir = fixture();
    let data = load_dashboard(&DirSource::new(dir.path())).unwrap();
    let mut arena = ChartArena::new();

    let grid = rebuild(&data, &ViewControls::default(), &mut arena);

    let abc = grid.cards.iter().find(|c| c.symbol == "ABC").unwrap();
    assert_eq!(abc.badge.kind, BadgeKind::Positive);
    assert_eq!(abc.badge.text, "▲ 5.25%");
    assert_eq!(abc.close_text(), "25.00");
    assert_eq!(abc.initials, "AH");
    assert_eq!(abc.status, SeriesStatus::Points(25));
    let chart = arena.get(abc.chart.unwrap()).unwrap();
    assert_eq!(chart.values.len(), 20);
}

#[test]
fn missing_and_broken_series_render_distinct_cards() {
    let dir = fixture();
    let data = load_dashboard(&DirSource::new(dir.path())).unwrap();
    let mut arena = ChartArena::new();
    let grid = rebuild(&data, &ViewControls::default(), &mut arena);

    assert_eq!(grid.cards.len(), 3);
    assert_eq!(arena.len(), 1, "only ABC has points to chart");

    let lmn = grid.cards.iter().find(|c| c.symbol == "LMN").unwrap();
    assert_eq!(lmn.status, SeriesStatus::NoData);
    assert_eq!(lmn.badge.text, "No data");
    assert_eq!(lmn.close_text(), "—");
    assert_eq!(lmn.date_text(), "—");
    assert!(lmn.chart.is_none());

    let xyz = grid.cards.iter().find(|c| c.symbol == "XYZ").unwrap();
    assert!(matches!(xyz.status, SeriesStatus::Unavailable(_)));
    assert_eq!(xyz.close_text(), "9.50");
}

#[test]
fn sort_and_range_reorder_cards() {
    let dir = fixture();
    let data = load_dashboard(&DirSource::new(dir.path())).unwrap();
    let mut arena = ChartArena::new();

    let mut controls = ViewControls::default();
    let order = |grid: &tickerboard_core::dashboard::GridView| -> Vec<String> {
        grid.cards.iter().map(|c| c.symbol.clone()).collect()
    };

    // 30d: only ABC has a value.
    assert_eq!(order(&rebuild(&data, &controls, &mut arena)), vec!["ABC", "LMN", "XYZ"]);

    controls.range = PerformanceWindow::Days7;
    assert_eq!(order(&rebuild(&data, &controls, &mut arena)), vec!["XYZ", "ABC", "LMN"]);

    controls.sort = SortMode::Name;
    assert_eq!(order(&rebuild(&data, &controls, &mut arena)), vec!["ABC", "LMN", "XYZ"]);
}

#[test]
fn empty_search_result_shows_placeholder_and_no_charts() {
    let dir = fixture();
    let data = load_dashboard(&DirSource::new(dir.path())).unwrap();
    let mut arena = ChartArena::new();
    rebuild(&data, &ViewControls::default(), &mut arena);
    assert_eq!(arena.len(), 1);

    let controls = ViewControls {
        search: "nothing matches this".into(),
        ..ViewControls::default()
    };
    let grid = rebuild(&data, &controls, &mut arena);
    assert!(grid.is_empty());
    assert!(grid.placeholder().is_some());
    assert!(arena.is_empty());
}

#[test]
fn search_matches_symbol_or_name_case_insensitively() {
    let dir = fixture();
    let data = load_dashboard(&DirSource::new(dir.path())).unwrap();
    let mut arena = ChartArena::new();

    for query in ["LMN", "Partners", "mn p"] {
        let controls = ViewControls {
            search: query.into(),
            ..ViewControls::default()
        };
        let grid = rebuild(&data, &controls, &mut arena);
        assert_eq!(grid.cards.len(), 1, "query {query:?}");
        assert_eq!(grid.cards[0].symbol, "LMN");
    }
}

#[test]
fn detail_view_for_loaded_symbol() {
    let dir = fixture();
    let data = load_dashboard(&DirSource::new(dir.path())).unwrap();
    let abc = &data.symbols[0];
    let view = DetailView::build(abc, data.points(abc), &data.summary, PerformanceWindow::Days30);

    assert_eq!(view.subtitle, "ABC");
    assert_eq!(view.outcome.history.len(), 25);
    assert_eq!(view.outcome.forecast.len(), 7);
    assert!((view.outcome.forecast[0] - 26.0).abs() < 1e-9);
    assert_eq!(view.recent.len(), 10);
    assert_eq!(view.recent[0].date, "2024-03-25");
}

#[test]
fn missing_symbol_list_fails_whole_load() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_dashboard(&DirSource::new(dir.path())).unwrap_err();
    assert!(matches!(err, LoadError::Symbols(SourceError::NotFound(_))));
}
