//! Tickerboard TUI: card grid with search, range and sort controls.
//!
//! Layout:
//! 1. Header: source, last update, current controls
//! 2. Grid: one card per symbol (initials, close, badge, sparkline)
//! 3. Status bar: key hints and the last message
//! 4. Overlays: forecast detail, help, error history

use std::fs::File;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

use tickerboard_core::config::{AppConfig, DEFAULT_CONFIG_FILE};
use tickerboard_core::dashboard::{open_source, ViewControls};
use tickerboard_tui::app::AppState;
use tickerboard_tui::worker::{self, WorkerCommand};
use tickerboard_tui::{input, persistence, ui};

#[derive(Parser)]
#[command(name = "tickerboard-tui", about = "Terminal dashboard for tickerboard data")]
struct Args {
    /// Path to the TOML config file. A missing file means defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Directory or http(s):// URL holding config/ and data/. Overrides the config file.
    #[arg(long)]
    base: Option<String>,

    /// Write logs to this file. Without it logging is off.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }

    let config = AppConfig::load_or_default(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    let base = args.base.unwrap_or_else(|| config.dashboard.base.clone());
    let source = open_source(&base, Duration::from_secs(config.source.timeout_secs))
        .with_context(|| format!("opening {base}"))?;
    let source_label = source.describe();

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen, DisableMouseCapture);
        default_hook(info);
    }));

    let state_path = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tickerboard")
        .join("state.json");

    // Worker channels
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let worker_handle =
        worker::spawn_worker(source, cmd_rx, resp_tx).context("spawning loader thread")?;

    let controls = ViewControls {
        search: String::new(),
        sort: config.dashboard.default_sort,
        range: config.dashboard.range(),
    };
    let mut app = AppState::new(cmd_tx.clone(), resp_rx, controls, source_label, state_path);
    persistence::restore(&mut app);
    app.request_load();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    if let Err(e) = persistence::store(&app) {
        tracing::warn!("could not save view state: {e}");
    }

    let _ = cmd_tx.send(WorkerCommand::Shutdown);
    let _ = worker_handle.join();

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        // 1. Track the viewport for grid columns and click hit-testing
        let size = terminal.size()?;
        app.viewport = Rect::new(0, 0, size.width, size.height);

        // 2. Render
        terminal.draw(|f| ui::draw(f, app))?;

        // 3. Drain worker responses (non-blocking)
        while let Ok(resp) = app.worker_rx.try_recv() {
            app.handle_worker_response(resp);
        }

        // 4. Poll for input events (50ms timeout for ~20 FPS tick)
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
        }

        // 5. Check quit
        if !app.running {
            break;
        }
    }
    Ok(())
}
