//! Card grid: one bordered card per symbol with a sparkline.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap};

use tickerboard_core::dashboard::{CardView, SeriesStatus, Sparkline};

use crate::app::{AppState, LoadPhase, CARD_HEIGHT, CARD_WIDTH};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.phase {
        LoadPhase::Loading if app.data.is_none() => {
            render_message(f, area, "Loading dashboard…", theme::muted());
            return;
        }
        LoadPhase::Failed(message) => {
            render_message(f, area, message, theme::negative());
            return;
        }
        _ => {}
    }

    if let Some(placeholder) = app.grid.placeholder() {
        render_message(f, area, placeholder, theme::muted());
        return;
    }

    let cols = app.grid_columns();
    let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
    let cursor_row = app.cursor / cols;
    let first_row = (cursor_row + 1).saturating_sub(visible_rows);

    for (i, card) in app.grid.cards.iter().enumerate() {
        let row = i / cols;
        if row < first_row || row >= first_row + visible_rows {
            continue;
        }
        let col = (i % cols) as u16;
        let y = area.y + (row - first_row) as u16 * CARD_HEIGHT;
        let x = area.x + col * CARD_WIDTH;
        let rect = Rect::new(x, y, CARD_WIDTH, CARD_HEIGHT).intersection(area);
        if rect.width < 4 || rect.height < 4 {
            continue;
        }
        let chart = card.chart.and_then(|id| app.arena.get(id));
        render_card(f, rect, card, chart, i == app.cursor);
    }
}

fn render_message(f: &mut Frame, area: Rect, message: &str, style: Style) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), style)),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_card(f: &mut Frame, area: Rect, card: &CardView, chart: Option<&Sparkline>, selected: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::card_border(selected))
        .title(format!(" {} ", card.name))
        .title_style(if selected { theme::accent_bold() } else { theme::text() });

    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = vec![
        Line::from(vec![
            Span::styled(format!("[{:<2}] ", card.initials), theme::neutral()),
            Span::styled(card.symbol.as_str(), theme::accent_bold()),
        ]),
        Line::from(vec![
            Span::styled(format!("{:>10}", card.close_text()), theme::text()),
            Span::styled(format!("  {}", card.date_text()), theme::muted()),
        ]),
        Line::from(Span::styled(card.badge.text.as_str(), theme::badge(card.badge.kind))),
    ];
    let text_height = (lines.len() as u16).min(inner.height);
    f.render_widget(
        Paragraph::new(lines),
        Rect::new(inner.x, inner.y, inner.width, text_height),
    );

    let chart_area = Rect::new(
        inner.x,
        inner.y + text_height,
        inner.width,
        inner.height.saturating_sub(text_height),
    );
    if chart_area.height == 0 {
        return;
    }
    match chart {
        Some(line) => render_sparkline(f, chart_area, line),
        None => {
            let label = match &card.status {
                SeriesStatus::Unavailable(_) => Span::styled(card.status.label(), theme::negative()),
                _ => Span::styled(card.status.label(), theme::muted()),
            };
            f.render_widget(Paragraph::new(Line::from(label)), chart_area);
        }
    }
}

fn render_sparkline(f: &mut Frame, area: Rect, line: &Sparkline) {
    let data = line.points();
    let (lo, hi) = line.bounds();
    let color = if line.delta() >= 0.0 { theme::POSITIVE } else { theme::NEGATIVE };

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .x_axis(Axis::default().bounds([0.0, (data.len().saturating_sub(1) as f64).max(1.0)]))
        .y_axis(Axis::default().bounds([lo, hi]));

    f.render_widget(chart, area);
}
