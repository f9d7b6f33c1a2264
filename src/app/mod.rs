//! Process-level orchestration.
//!
//! Wires the record store, the retention sweeper and the HTTP server together
//! and tears them down in order on shutdown.

pub mod shutdown;

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::initialization::init_store;
use crate::retention::{spawn_sweeper, SweepSchedule};
use crate::server::{self, AppState};
use crate::storage::RecordStore;

// Re-export public API
pub use shutdown::{shutdown_gracefully, shutdown_signal};

/// Runs the service until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the visitor log cannot
/// be created, the port cannot be bound, or the server fails while running.
pub async fn run_server(config: Config) -> Result<()> {
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| InitializationError::BindError { addr, source })?;

    run_server_with(config, listener, shutdown_signal()).await
}

/// Runs the service on an already-bound listener until `shutdown` resolves.
pub async fn run_server_with<F>(config: Config, listener: TcpListener, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    config
        .validate()
        .map_err(InitializationError::from)
        .context("Configuration validation failed")?;

    let store = init_store(&config)
        .await
        .context("Failed to initialize the visitor log")?;

    run_server_with_store(config, store, listener, shutdown).await
}

/// Runs the service on an already-opened store.
///
/// The caller may keep its own clone of `store`; every handle shares the
/// store's lock with the handlers and the sweeper.
pub async fn run_server_with_store<F>(
    config: Config,
    store: Arc<RecordStore>,
    listener: TcpListener,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let cancel = CancellationToken::new();
    let schedule = SweepSchedule {
        fire_at: config.sweep_time,
        retention: config.retention(),
    };
    info!(
        "Retention: {} days, sweeping daily at {}",
        config.retention_days,
        config.sweep_time.format("%H:%M")
    );
    let sweeper_task = spawn_sweeper(store.clone(), schedule, cancel.child_token());

    let served = server::serve(listener, AppState::new(store), shutdown).await;

    shutdown_gracefully(cancel, Some(sweeper_task)).await;
    info!("Server shut down");

    served.context("Server error")
}
