//! Tickerboard TUI: terminal dashboard over the fetcher's JSON output.
//!
//! Provides:
//! - A searchable, sortable grid of symbol cards with sparklines
//! - A forecast detail modal per symbol
//! - Background loading from a directory or an HTTP base URL

pub mod app;
pub mod input;
pub mod persistence;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;
