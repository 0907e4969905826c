//! Top-level UI layout: header, card grid, status bar, overlays.

pub mod cards;
pub mod header;
pub mod overlays;
pub mod status_bar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::app::{AppState, Overlay, HEADER_HEIGHT};

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    header::render(f, chunks[0], app);
    cards::render(f, chunks[1], app);
    status_bar::render(f, chunks[2], app);

    // Overlays cover the whole frame so click hit-testing can use the viewport.
    match &app.overlay {
        Overlay::Detail(view) => overlays::render_detail(f, detail_area(area), view),
        Overlay::Help => overlays::render_help(f, help_area(area)),
        Overlay::ErrorHistory => overlays::render_error_history(f, error_area(area), app),
        Overlay::None => {}
    }
}

pub fn detail_area(area: Rect) -> Rect {
    centered_rect(90, 90, area)
}

pub fn help_area(area: Rect) -> Rect {
    centered_rect(60, 70, area)
}

pub fn error_area(area: Rect) -> Rect {
    centered_rect(80, 70, area)
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
