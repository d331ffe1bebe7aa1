//! OS signal handling.

use crate::lifecycle::Shutdown;

/// Wait for SIGINT (Ctrl+C) or, on unix, SIGTERM.
pub async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

/// Spawn a task that triggers `shutdown` on the first termination signal.
pub fn spawn_signal_handler(shutdown: Shutdown) {
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });
}
