//! View preferences: JSON save/load across restarts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use tickerboard_core::dashboard::SortMode;
use tickerboard_core::domain::PerformanceWindow;

use crate::app::AppState;

/// Serializable subset of app state that persists across restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedState {
    pub range: PerformanceWindow,
    pub sort: SortMode,
}

/// Load persisted state from disk. `None` if the file is missing or corrupt.
pub fn load(path: &Path) -> Option<PersistedState> {
    let content = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(state) => Some(state),
        Err(e) => {
            tracing::warn!(path = %path.display(), "ignoring unreadable view state: {e}");
            None
        }
    }
}

/// Save persisted state to disk. Creates parent directories if needed.
pub fn save(path: &Path, state: &PersistedState) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Extract persisted state from AppState.
pub fn extract(app: &AppState) -> PersistedState {
    PersistedState {
        range: app.controls.range,
        sort: app.controls.sort,
    }
}

/// Apply persisted state to AppState.
pub fn apply(app: &mut AppState, state: PersistedState) {
    app.controls.range = state.range;
    app.controls.sort = state.sort;
}

/// Apply the state saved at `app.state_path`, if any.
pub fn restore(app: &mut AppState) {
    if let Some(state) = load(&app.state_path) {
        apply(app, state);
    }
}

/// Write the current view preferences to `app.state_path`.
pub fn store(app: &AppState) -> anyhow::Result<()> {
    save(&app.state_path, &extract(app))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let state = PersistedState {
            range: PerformanceWindow::Days14,
            sort: SortMode::Name,
        };
        save(&path, &state).unwrap();
        assert_eq!(load(&path), Some(state));
    }

    #[test]
    fn missing_file_returns_none() {
        assert!(load(Path::new("/nonexistent/path/state.json")).is_none());
    }

    #[test]
    fn corrupt_file_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not valid json {{{").unwrap();
        assert!(load(&path).is_none());
    }

    #[test]
    fn extract_then_apply() {
        let (mut app, _rx) = crate::app::tests::test_app();
        app.controls.range = PerformanceWindow::Days7;
        app.controls.sort = SortMode::Name;
        let saved = extract(&app);

        let (mut fresh, _rx2) = crate::app::tests::test_app();
        apply(&mut fresh, saved);
        assert_eq!(fresh.controls.range, PerformanceWindow::Days7);
        assert_eq!(fresh.controls.sort, SortMode::Name);
    }

    #[test]
    fn store_and_restore_use_app_state_path() {
        let dir = tempfile::tempdir().unwrap();
        let (mut app, _rx) = crate::app::tests::test_app();
        app.state_path = dir.path().join("tickerboard").join("state.json");
        app.controls.range = PerformanceWindow::Days14;
        app.controls.sort = SortMode::Name;
        store(&app).unwrap();
        assert!(app.state_path.exists());

        let (mut fresh, _rx2) = crate::app::tests::test_app();
        fresh.state_path = app.state_path.clone();
        restore(&mut fresh);
        assert_eq!(fresh.controls.range, PerformanceWindow::Days14);
        assert_eq!(fresh.controls.sort, SortMode::Name);
    }

    #[test]
    fn file_format_is_readable() {
        let json = serde_json::to_string(&PersistedState {
            range: PerformanceWindow::Days30,
            sort: SortMode::Performance,
        })
        .unwrap();
        assert_eq!(json, r#"{"range":"30","sort":"performance"}"#);
    }
}
