//! Graceful shutdown handling.

use tokio::signal;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Resolves on Ctrl+C, or on SIGTERM on Unix.
///
/// A handler that cannot be installed is logged and treated as a signal that
/// never arrives, so the server keeps running.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => log::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                log::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                log::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Stops the retention sweeper and waits for it to finish.
///
/// A sweep already in progress completes before the task exits.
pub async fn shutdown_gracefully(cancel: CancellationToken, sweeper_task: Option<JoinHandle<()>>) {
    cancel.cancel();
    if let Some(task) = sweeper_task {
        if let Err(e) = task.await {
            log::warn!("Retention sweeper task failed: {:?}", e);
        }
    }
}
