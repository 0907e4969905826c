//! Application state: single-owner, main-thread only.
//!
//! All TUI state lives here. The loader thread communicates via channels.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;
use ratatui::layout::Rect;

use tickerboard_core::dashboard::{
    rebuild, CardView, ChartArena, DashboardData, DetailView, GridView, ViewControls,
};

use crate::worker::{WorkerCommand, WorkerResponse};

/// Width of one card in the grid, borders included.
pub const CARD_WIDTH: u16 = 34;
/// Height of one card in the grid, borders included.
pub const CARD_HEIGHT: u16 = 9;
/// Rows taken by the header above the grid.
pub const HEADER_HEIGHT: u16 = 4;

const ERROR_HISTORY_CAP: usize = 50;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Symbol list or summary could not be loaded.
    Load,
    /// One series file could not be read.
    Series,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Load => "LOAD",
            ErrorCategory::Series => "DATA",
            ErrorCategory::Other => "ERR",
        }
    }
}

/// Where the dashboard is in its load cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadPhase {
    Loading,
    Ready,
    /// The list or summary failed; the grid is replaced by this message.
    Failed(String),
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    None,
    Detail(Box<DetailView>),
    Help,
    ErrorHistory,
}

/// Whether typed characters go to the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,

    // Dashboard
    pub phase: LoadPhase,
    pub data: Option<DashboardData>,
    pub controls: ViewControls,
    pub grid: GridView,
    pub arena: ChartArena,
    pub cursor: usize,
    pub source_label: String,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
    pub input_mode: InputMode,
    /// Last known terminal area, for grid columns and click hit-testing.
    pub viewport: Rect,

    pub state_path: PathBuf,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        controls: ViewControls,
        source_label: String,
        state_path: PathBuf,
    ) -> Self {
        Self {
            running: true,
            phase: LoadPhase::Loading,
            data: None,
            controls,
            grid: GridView { cards: Vec::new() },
            arena: ChartArena::new(),
            cursor: 0,
            source_label,
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
            input_mode: InputMode::Normal,
            viewport: Rect::new(0, 0, 120, 40),
            state_path,
        }
    }

    /// Ask the worker for a fresh load.
    pub fn request_load(&mut self) {
        if self.worker_tx.send(WorkerCommand::Load).is_err() {
            self.push_error(
                ErrorCategory::Other,
                "Loader thread is not running".into(),
                String::new(),
            );
            return;
        }
        self.phase = LoadPhase::Loading;
        self.set_status(format!("Loading from {}", self.source_label));
    }

    pub fn handle_worker_response(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::Loaded(data) => {
                let degraded = data.degraded();
                for (symbol, reason) in &degraded {
                    self.push_error(
                        ErrorCategory::Series,
                        format!("Series unavailable: {reason}"),
                        symbol.clone(),
                    );
                }
                let count = data.symbols.len();
                self.data = Some(*data);
                self.phase = LoadPhase::Ready;
                self.refresh();
                if degraded.is_empty() {
                    self.set_status(format!("Loaded {count} symbols"));
                } else {
                    self.set_warning(format!(
                        "Loaded {count} symbols, {} series unavailable",
                        degraded.len()
                    ));
                }
            }
            WorkerResponse::LoadFailed(message) => {
                self.data = None;
                self.grid.cards.clear();
                self.arena.clear();
                self.phase = LoadPhase::Failed(message.clone());
                self.push_error(ErrorCategory::Load, message, self.source_label.clone());
            }
        }
    }

    /// Re-run filter → sort → cards, tearing down every chart first.
    pub fn refresh(&mut self) {
        match &self.data {
            Some(data) => {
                self.grid = rebuild(data, &self.controls, &mut self.arena);
            }
            None => {
                self.grid.cards.clear();
                self.arena.clear();
            }
        }
        self.cursor = self.cursor.min(self.grid.cards.len().saturating_sub(1));
    }

    pub fn push_search_char(&mut self, c: char) {
        self.controls.search.push(c);
        self.cursor = 0;
        self.refresh();
    }

    pub fn pop_search_char(&mut self) {
        if self.controls.search.pop().is_some() {
            self.refresh();
        }
    }

    pub fn clear_search(&mut self) {
        if !self.controls.search.is_empty() {
            self.controls.search.clear();
            self.refresh();
        }
    }

    pub fn cycle_range(&mut self) {
        self.controls.range = self.controls.range.next();
        self.refresh();
        self.set_status(format!("Range: {} days", self.controls.range.days()));
    }

    pub fn toggle_sort(&mut self) {
        self.controls.sort = self.controls.sort.toggle();
        self.refresh();
        self.set_status(format!("Sort: {}", self.controls.sort.label()));
    }

    /// Cards per grid row at the current viewport width.
    pub fn grid_columns(&self) -> usize {
        usize::from((self.viewport.width / CARD_WIDTH).max(1))
    }

    /// Move the selection by whole cards; `dx` within a row, `dy` across rows.
    pub fn move_cursor(&mut self, dx: isize, dy: isize) {
        let len = self.grid.cards.len();
        if len == 0 {
            return;
        }
        let cols = self.grid_columns() as isize;
        let target = self.cursor as isize + dx + dy * cols;
        self.cursor = target.clamp(0, len as isize - 1) as usize;
    }

    pub fn selected_card(&self) -> Option<&CardView> {
        self.grid.cards.get(self.cursor)
    }

    /// Open the detail modal for the selected card.
    pub fn open_detail(&mut self) {
        let Some(data) = &self.data else { return };
        let Some(card) = self.grid.cards.get(self.cursor) else {
            return;
        };
        let Some(entry) = data.symbols.iter().find(|s| s.key() == card.key) else {
            return;
        };
        let view = DetailView::build(entry, data.points(entry), &data.summary, self.controls.range);
        self.overlay = Overlay::Detail(Box::new(view));
    }

    pub fn close_overlay(&mut self) {
        self.overlay = Overlay::None;
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        tracing::warn!(category = category.label(), %context, "{message}");
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
