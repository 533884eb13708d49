use std::future::Future;
use std::io;
use std::time::Instant;

use crate::config::ServerConfig;
use crate::server::{Result, ServerError};
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Drives `server` to completion and reports how the run ended.
pub async fn serve_with_shutdown<F>(config: &ServerConfig, server: F) -> Result<()>
where
    F: Future<Output = io::Result<()>>,
{
    if config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_SERVER_STARTUP,
            host = %config.host,
            "Listening on every interface"
        );
    }

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %config.server_addr(),
        "Accepting connections"
    );

    let started = Instant::now();
    let outcome = server.await.map_err(ServerError::Runtime);
    let uptime_secs = started.elapsed().as_secs();

    match &outcome {
        Ok(()) => tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            uptime_secs,
            "Server stopped"
        ),
        Err(error) => tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            error_code = error.error_code(),
            suggestion = error.suggestion(),
            uptime_secs,
            "Server failed"
        ),
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn clean_exit_is_ok() {
        let config = ServerConfig::default();
        assert!(serve_with_shutdown(&config, async { Ok(()) }).await.is_ok());
    }

    #[tokio::test]
    async fn io_failure_becomes_runtime_error() {
        let config = ServerConfig::default();
        let result = serve_with_shutdown(&config, async { Err(io::Error::other("boom")) }).await;

        assert!(matches!(result, Err(ServerError::Runtime(_))));
    }
}
