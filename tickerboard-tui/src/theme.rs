//! Parrot/neon theme tokens for the Tickerboard TUI
//!
//! # Color Palette
//! - **Accent**: Electric cyan (focus, selected card, history line)
//! - **Positive**: Neon green (gains)
//! - **Negative**: Hot pink (losses, errors)
//! - **Warning**: Neon orange (forecast line, warnings)
//! - **Neutral**: Cool purple (neutral badges, hints)
//! - **Muted**: Steel blue (secondary text, borders)

use ratatui::style::{Color, Modifier, Style};

use tickerboard_core::dashboard::BadgeKind;

pub const BACKGROUND: Color = Color::Rgb(18, 18, 20);
pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT: Color = Color::White;
/// Dimmed orange used for the forecast band.
pub const BAND: Color = Color::Rgb(140, 90, 40);

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn card_border(selected: bool) -> Style {
    if selected {
        accent_bold()
    } else {
        muted()
    }
}

/// Green for gains (zero included), pink for losses, muted when absent.
pub fn change_color(value: Option<f64>) -> Color {
    match value {
        Some(v) if v >= 0.0 => POSITIVE,
        Some(v) if v < 0.0 => NEGATIVE,
        _ => MUTED,
    }
}

pub fn badge(kind: BadgeKind) -> Style {
    let fg = match kind {
        BadgeKind::Positive => POSITIVE,
        BadgeKind::Negative => NEGATIVE,
        BadgeKind::Neutral => NEUTRAL,
    };
    Style::default().fg(fg).add_modifier(Modifier::BOLD)
}
