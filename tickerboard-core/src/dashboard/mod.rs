//! Dashboard view model: loading, filter/sort, cards, charts, detail view.
//!
//! Nothing in here touches a terminal. The TUI owns a [`ViewControls`] and a
//! [`ChartArena`], calls [`rebuild`] after every control change, and draws
//! whatever comes back.

pub mod card;
pub mod chart;
pub mod detail;
pub mod loader;
pub mod source;
pub mod view;

pub use card::{format_number, format_percent, Badge, BadgeKind, CardView, SeriesStatus};
pub use chart::{ChartArena, ChartId, Sparkline, SPARKLINE_POINTS};
pub use detail::DetailView;
pub use loader::{load_dashboard, DashboardData, LoadError, SeriesSlot};
pub use source::{open_source, DashboardSource, DirSource, HttpSource, SourceError};
pub use view::{filter_entries, rebuild, sort_entries, GridView, SortMode, ViewControls};
