//! Bottom status bar: key hints and the last status message.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{AppState, InputMode, StatusLevel};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let mut spans: Vec<Span> = Vec::new();

    let hints = match app.input_mode {
        InputMode::Search => " type to filter  Enter/Esc:done  Backspace:delete",
        InputMode::Normal => " /:search r:range s:sort Enter:detail R:reload e:errors ?:help q:quit",
    };
    spans.push(Span::styled(hints, theme::muted()));

    if let Some((msg, level)) = &app.status_message {
        spans.push(Span::raw(" | "));
        let style = match level {
            StatusLevel::Info => theme::accent(),
            StatusLevel::Warning => theme::warning(),
            StatusLevel::Error => theme::negative(),
        };
        spans.push(Span::styled(msg.as_str(), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
