//! Overlay widgets: forecast detail, help, error history.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Block, Borders, Cell, Chart, Clear, Dataset, GraphType, Paragraph, Row, Table,
};

use tickerboard_core::dashboard::{format_number, format_percent, DetailView};

use crate::app::AppState;
use crate::theme;

/// Forecast detail modal for one symbol.
pub fn render_detail(f: &mut Frame, popup: Rect, view: &DetailView) {
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(format!(" {} — {} [Esc/x]close ", view.title, view.subtitle))
        .title_style(theme::accent_bold());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let recent_height = (view.recent.len() as u16 + 2).min(inner.height / 3);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(6),
            Constraint::Length(recent_height),
        ])
        .split(inner);

    let perf_style = Style::default().fg(theme::change_color(view.performance));
    let header = vec![
        Line::from(vec![
            Span::styled(format!("{}-day performance: ", view.range.days()), theme::muted()),
            Span::styled(format_percent(view.performance), perf_style.add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::styled(view.summary_line(), theme::text())),
    ];
    f.render_widget(Paragraph::new(header), chunks[0]);

    if view.has_history() {
        render_forecast_chart(f, chunks[1], view);
    } else {
        f.render_widget(
            Paragraph::new(Span::styled("No price history for this symbol.", theme::muted())),
            chunks[1],
        );
    }

    render_recent_table(f, chunks[2], view);
}

fn render_forecast_chart(f: &mut Frame, area: Rect, view: &DetailView) {
    let outcome = &view.outcome;
    let n = outcome.history.len();

    let history: Vec<(f64, f64)> = outcome
        .history
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect();
    let ahead = |values: Vec<f64>| -> Vec<(f64, f64)> {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| ((n + i) as f64, v))
            .collect()
    };
    let forecast = ahead(outcome.forecast.clone());
    let upper = ahead(outcome.bands.iter().map(|b| b.upper).collect());
    let lower = ahead(outcome.bands.iter().map(|b| b.lower).collect());

    let all = history.iter().chain(&forecast).chain(&upper).chain(&lower);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in all {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    let padding = ((y_max - y_min).abs() * 0.05).max(0.01);
    let (y_min, y_max) = (y_min - padding, y_max + padding);
    let x_max = (n + outcome.forecast.len()).saturating_sub(1) as f64;

    let datasets = vec![
        Dataset::default()
            .name("History")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::ACCENT))
            .data(&history),
        Dataset::default()
            .name("Forecast")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(theme::WARNING))
            .data(&forecast),
        Dataset::default()
            .name("Band upper")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::BAND))
            .data(&upper),
        Dataset::default()
            .name("Band lower")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme::BAND))
            .data(&lower),
    ];

    let labels = view.labels();
    let first = labels.first().cloned().unwrap_or_default();
    let last_actual = view.history_labels.last().cloned().unwrap_or_default();
    let last = labels.last().cloned().unwrap_or_default();

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([0.0, x_max.max(1.0)])
                .labels(vec![
                    Span::styled(first, theme::muted()),
                    Span::styled(last_actual, theme::muted()),
                    Span::styled(last, theme::muted()),
                ]),
        )
        .y_axis(
            Axis::default()
                .style(theme::muted())
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::styled(format!("{y_min:.2}"), theme::muted()),
                    Span::styled(format!("{y_max:.2}"), theme::muted()),
                ]),
        );

    f.render_widget(chart, area);
}

fn render_recent_table(f: &mut Frame, area: Rect, view: &DetailView) {
    let rows: Vec<Row> = view
        .recent
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(row.date.clone()),
                Cell::from(format_number(Some(row.close))),
                Cell::from(format_percent(Some(row.change_pct)))
                    .style(Style::default().fg(theme::change_color(Some(row.change_pct)))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(12),
            Constraint::Length(10),
        ],
    )
    .header(Row::new(vec!["Date", "Close", "Change"]).style(theme::accent_bold()))
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(theme::muted())
            .title(" Recent activity ")
            .title_style(theme::muted()),
    );

    f.render_widget(table, area);
}

/// Keyboard reference.
pub fn render_help(f: &mut Frame, popup: Rect) {
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Help [any key]close ")
        .title_style(theme::accent_bold());

    let mut lines: Vec<Line> = Vec::new();
    section(&mut lines, "Grid");
    key(&mut lines, "h j k l / arrows", "Move selection");
    key(&mut lines, "Enter", "Open forecast detail");
    key(&mut lines, "/", "Search by name or symbol");
    key(&mut lines, "Esc", "Clear search");
    key(&mut lines, "r", "Cycle range 7 / 14 / 30 days");
    key(&mut lines, "s", "Toggle sort: performance / name");
    key(&mut lines, "R", "Reload data");
    key(&mut lines, "e", "Error history");
    key(&mut lines, "q / Ctrl+C", "Quit");
    lines.push(Line::from(""));
    section(&mut lines, "Detail");
    key(&mut lines, "Esc / x / Enter", "Close");
    key(&mut lines, "click outside", "Close");

    f.render_widget(Paragraph::new(lines).block(block), popup);
}

fn section(lines: &mut Vec<Line<'static>>, title: &'static str) {
    lines.push(Line::from(Span::styled(title, theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'static>>, keys: &'static str, what: &'static str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {keys:>18}  "), theme::warning()),
        Span::styled(what, theme::muted()),
    ]));
}

/// Error history overlay.
pub fn render_error_history(f: &mut Frame, popup: Rect, app: &AppState) {
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [Esc]close [j/k]scroll ",
            app.error_history.len()
        ))
        .title_style(theme::negative());

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        let text = Paragraph::new(Span::styled("No errors recorded.", theme::muted()));
        f.render_widget(text, inner);
        return;
    }

    let visible_height = inner.height as usize;
    let start = app.error_scroll;
    let end = (start + visible_height).min(app.error_history.len());

    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app.error_history.iter().enumerate().take(end).skip(start) {
        let style = if i == app.error_scroll {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", err.timestamp.format("%H:%M:%S")),
                theme::muted(),
            ),
            Span::styled(format!("[{}] ", err.category.label()), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));

        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), theme::muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}
