//! Input dispatch. Overlays first, then the search box, then global keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::app::{AppState, InputMode, Overlay};
use crate::ui;

/// Handle a key event.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return;
    }

    // 1. Overlays consume input first.
    match &app.overlay {
        Overlay::Detail(_) => {
            handle_detail_overlay(app, key);
            return;
        }
        Overlay::Help => {
            app.close_overlay();
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Search box captures typing while active.
    if app.input_mode == InputMode::Search {
        handle_search_key(app, key);
        return;
    }

    // 3. Grid keys.
    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('/') => app.input_mode = InputMode::Search,
        KeyCode::Esc => app.clear_search(),
        KeyCode::Char('r') => app.cycle_range(),
        KeyCode::Char('s') => app.toggle_sort(),
        KeyCode::Char('R') => app.request_load(),
        KeyCode::Char('?') => app.overlay = Overlay::Help,
        KeyCode::Char('e') => {
            app.error_scroll = 0;
            app.overlay = Overlay::ErrorHistory;
        }
        KeyCode::Char('h') | KeyCode::Left => app.move_cursor(-1, 0),
        KeyCode::Char('l') | KeyCode::Right => app.move_cursor(1, 0),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(0, -1),
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(0, 1),
        KeyCode::Home | KeyCode::Char('g') => app.cursor = 0,
        KeyCode::End | KeyCode::Char('G') => {
            app.cursor = app.grid.cards.len().saturating_sub(1);
        }
        KeyCode::Enter => app.open_detail(),
        _ => {}
    }
}

/// Handle a mouse event. A left click outside the open modal closes it.
pub fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let popup = match &app.overlay {
        Overlay::Detail(_) => ui::detail_area(app.viewport),
        Overlay::Help => ui::help_area(app.viewport),
        Overlay::ErrorHistory => ui::error_area(app.viewport),
        Overlay::None => return,
    };
    if !popup.contains(Position::new(mouse.column, mouse.row)) {
        app.close_overlay();
    }
}

fn handle_detail_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('x') => {
            app.close_overlay();
        }
        _ => {}
    }
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.close_overlay();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

fn handle_search_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => app.input_mode = InputMode::Normal,
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) => app.push_search_char(c),
        _ => {}
    }
}
