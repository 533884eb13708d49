//! Graceful shutdown signal handling.

use std::time::Duration;

use crate::TRACING_TARGET_SERVER_SHUTDOWN as TRACING_TARGET;

/// Resolves once SIGINT (Ctrl+C) or, on Unix, SIGTERM is received.
///
/// A handler that fails to install is logged and never fires, so the
/// other signal still works.
pub async fn shutdown_signal(shutdown_timeout: Duration) {
    let signal = tokio::select! {
        () = interrupt() => "SIGINT",
        () = terminate() => "SIGTERM",
    };

    tracing::info!(
        target: TRACING_TARGET,
        signal,
        timeout_secs = shutdown_timeout.as_secs(),
        "Graceful shutdown initiated"
    );
}

async fn interrupt() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(
            target: TRACING_TARGET,
            error = %error,
            "Failed to install SIGINT handler"
        );
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut stream) => {
            stream.recv().await;
        }
        Err(error) => {
            tracing::error!(
                target: TRACING_TARGET,
                error = %error,
                "Failed to install SIGTERM handler"
            );
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(not(unix))]
async fn terminate() {
    std::future::pending::<()>().await;
}
