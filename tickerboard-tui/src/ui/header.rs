//! Header: title, last update time, current controls.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use tickerboard_core::domain::PerformanceWindow;

use crate::app::{AppState, InputMode};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme::muted());

    let lines = vec![
        Line::from(vec![
            Span::styled(" Tickerboard ", theme::accent_bold()),
            Span::styled(app.source_label.as_str(), theme::muted()),
        ]),
        Line::from(Span::styled(format!(" {}", last_update_text(app)), theme::muted())),
        controls_line(app),
    ];

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Local-time summary timestamp, or a notice when there is none.
pub fn last_update_text(app: &AppState) -> String {
    match app.data.as_ref().and_then(|d| d.summary.last_updated) {
        Some(ts) => format!(
            "Last update: {}",
            ts.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S")
        ),
        None => "No update available.".to_string(),
    }
}

fn controls_line(app: &AppState) -> Line<'static> {
    let searching = app.input_mode == InputMode::Search;
    let search_style = if searching {
        theme::accent_bold()
    } else {
        theme::text()
    };
    let cursor = if searching { "_" } else { "" };

    let mut spans = vec![
        Span::styled(" Search: ", theme::muted()),
        Span::styled(format!("[{}{cursor}]", app.controls.search), search_style),
        Span::styled("  Range: ", theme::muted()),
    ];
    for window in PerformanceWindow::ALL {
        let style = if window == app.controls.range {
            theme::accent_bold()
        } else {
            theme::muted()
        };
        spans.push(Span::styled(format!("{}d ", window.days()), style));
    }
    spans.push(Span::styled(" Sort: ", theme::muted()));
    spans.push(Span::styled(app.controls.sort.label(), theme::accent()));
    Line::from(spans)
}
