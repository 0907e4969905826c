//! Background loader thread: dashboard loads never block the draw loop.
//!
//! Communication with the TUI main thread is via `mpsc` channels.
//! The worker fans out series reads on a private rayon::ThreadPool (not the global pool).

use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use tickerboard_core::dashboard::{load_dashboard, DashboardData, DashboardSource, LoadError};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    /// Load symbol list, summary and every series.
    Load,
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    Loaded(Box<DashboardData>),
    /// Symbol list or summary failed; the message is shown in place of the grid.
    LoadFailed(String),
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    source: Box<dyn DashboardSource>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("tickerboard-loader".into())
        .spawn(move || worker_loop(source, rx, tx))
}

fn worker_loop(
    source: Box<dyn DashboardSource>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) {
    let pool = match rayon::ThreadPoolBuilder::new()
        .thread_name(|i| format!("tickerboard-pool-{i}"))
        .build()
    {
        Ok(pool) => Some(pool),
        Err(e) => {
            tracing::warn!("private loader pool unavailable, using global pool: {e}");
            None
        }
    };

    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(WorkerCommand::Load) => {
                let result = match &pool {
                    Some(pool) => pool.install(|| load_dashboard(source.as_ref())),
                    None => load_dashboard(source.as_ref()),
                };
                if tx.send(to_response(result)).is_err() {
                    break;
                }
            }
        }
    }
    tracing::debug!("loader thread stopped");
}

fn to_response(result: Result<DashboardData, LoadError>) -> WorkerResponse {
    match result {
        Ok(data) => WorkerResponse::Loaded(Box::new(data)),
        Err(e) => {
            tracing::error!("dashboard load failed: {e}");
            WorkerResponse::LoadFailed(e.to_string())
        }
    }
}
