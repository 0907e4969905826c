//! Tickerboard CLI: fetch, status and forecast commands.
//!
//! Commands:
//! - `fetch`: pull daily CSV quotes for every configured symbol and write the JSON files
//! - `status`: tabulate the current summary file
//! - `forecast`: print the regression forecast and recent activity for one symbol

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tickerboard_core::config::{AppConfig, DEFAULT_CONFIG_FILE};
use tickerboard_core::dashboard::{format_number, format_percent, DetailView};
use tickerboard_core::data::{load_symbols, run_fetch, DataStore, LogProgress, StooqProvider};
use tickerboard_core::domain::{PerformanceWindow, Summary, SymbolConfig};

#[derive(Parser)]
#[command(
    name = "tickerboard",
    about = "Tickerboard CLI: daily quote fetcher and forecast viewer"
)]
struct Cli {
    /// Path to the TOML config file. A missing file means defaults.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every configured symbol and rewrite the series and summary files.
    Fetch {
        /// Symbol list (JSON array of {symbol, name, domain}).
        #[arg(long)]
        symbols: Option<PathBuf>,

        /// Output directory for series and summary files.
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Show the summary file as a table.
    Status {
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Print the forecast detail view for one symbol.
    Forecast {
        /// Symbol as configured (case-insensitive).
        symbol: String,

        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Trailing range for the performance line: 7, 14 or 30.
        #[arg(long, default_value_t = 30)]
        range: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;

    match cli.command {
        Commands::Fetch { symbols, data_dir } => run_fetch_cmd(config, symbols, data_dir),
        Commands::Status { data_dir } => {
            run_status(&data_dir.unwrap_or_else(|| config.paths.data_dir.clone()))
        }
        Commands::Forecast {
            symbol,
            data_dir,
            range,
        } => run_forecast(&config, &symbol, data_dir, range),
    }
}

fn run_fetch_cmd(
    config: AppConfig,
    symbols: Option<PathBuf>,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let symbols_path = symbols.unwrap_or(config.paths.symbols);
    let data_dir = data_dir.unwrap_or(config.paths.data_dir);

    let symbols = load_symbols(&symbols_path)
        .with_context(|| format!("reading symbol list {}", symbols_path.display()))?;
    let provider = StooqProvider::new(&config.source)?;
    let store = DataStore::new(&data_dir);

    tracing::info!(
        symbols = symbols.len(),
        data_dir = %data_dir.display(),
        "starting fetch"
    );
    let report = run_fetch(&provider, &store, &symbols, &LogProgress)
        .context("fetch pass failed")?;

    for (symbol, reason) in &report.skipped {
        eprintln!("Skipped {symbol}: {reason}");
    }
    println!(
        "Wrote {}/{} series to {}",
        report.written.len(),
        report.total,
        data_dir.display()
    );
    Ok(())
}

fn run_status(data_dir: &Path) -> Result<()> {
    let store = DataStore::new(data_dir);
    if !store.summary_path().exists() {
        println!("No summary file in {}", data_dir.display());
        return Ok(());
    }
    let summary = store.read_summary()?;

    match summary.last_updated {
        Some(ts) => println!(
            "Last update: {}",
            ts.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M:%S")
        ),
        None => println!("Last update: none"),
    }
    if summary.symbols.is_empty() {
        println!("Summary has no symbols.");
        return Ok(());
    }

    println!();
    println!(
        "{:<10} {:>12} {:<12} {:>9} {:>9} {:>9} {:<6}",
        "Symbol", "Close", "Date", "7d", "14d", "30d", "Series"
    );
    println!("{}", "-".repeat(73));
    for (key, entry) in &summary.symbols {
        println!(
            "{:<10} {:>12} {:<12} {:>9} {:>9} {:>9} {:<6}",
            key.to_uppercase(),
            format_number(Some(entry.latest_close)),
            entry.latest_date,
            format_percent(entry.performance(PerformanceWindow::Days7)),
            format_percent(entry.performance(PerformanceWindow::Days14)),
            format_percent(entry.performance(PerformanceWindow::Days30)),
            if store.has_series(key) { "yes" } else { "no" },
        );
    }
    Ok(())
}

fn run_forecast(
    config: &AppConfig,
    symbol: &str,
    data_dir: Option<PathBuf>,
    range: usize,
) -> Result<()> {
    let Some(window) = PerformanceWindow::from_days(range) else {
        bail!("--range must be 7, 14 or 30 (got {range})");
    };
    let store = DataStore::new(data_dir.unwrap_or_else(|| config.paths.data_dir.clone()));

    let series = store
        .read_series(symbol)
        .with_context(|| format!("no series for {symbol}"))?;
    let summary = if store.summary_path().exists() {
        store.read_summary()?
    } else {
        Summary {
            last_updated: None,
            symbols: Default::default(),
        }
    };

    // Name comes from the symbol list when it is readable.
    let entry = load_symbols(&config.paths.symbols)
        .ok()
        .and_then(|list| {
            list.into_iter()
                .find(|s| s.symbol.eq_ignore_ascii_case(symbol))
        })
        .unwrap_or_else(|| SymbolConfig {
            symbol: symbol.to_string(),
            name: symbol.to_uppercase(),
            domain: String::new(),
        });

    let view = DetailView::build(&entry, &series.series, &summary, window);
    print_detail(&view);
    Ok(())
}

fn print_detail(view: &DetailView) {
    println!("{} ({})", view.title, view.subtitle);
    if let Some(logo) = &view.logo {
        println!("Logo: {logo}");
    }
    println!(
        "{}-day performance: {}",
        view.range.days(),
        format_percent(view.performance)
    );
    println!("{}", view.summary_line());
    println!();

    if view.has_history() {
        println!("{:<12} {:>12} {:>12} {:>12}", "Forecast", "Value", "Lower", "Upper");
        println!("{}", "-".repeat(51));
        for (i, (value, band)) in view
            .outcome
            .forecast
            .iter()
            .zip(&view.outcome.bands)
            .enumerate()
        {
            println!(
                "{:<12} {:>12} {:>12} {:>12}",
                format!("+{}", i + 1),
                format_number(Some(*value)),
                format_number(Some(band.lower)),
                format_number(Some(band.upper)),
            );
        }
        println!();
    }

    println!("{:<12} {:>12} {:>10}", "Date", "Close", "Change");
    println!("{}", "-".repeat(36));
    for row in &view.recent {
        println!(
            "{:<12} {:>12} {:>10}",
            row.date,
            format_number(Some(row.close)),
            format_percent(Some(row.change_pct)),
        );
    }
}
