use axum::Router;
use tokio::net::TcpListener;

use crate::TRACING_TARGET_SERVER_STARTUP;
use crate::config::ServerConfig;
use crate::server::{Result, ServerError, serve_with_shutdown, shutdown_signal};

/// Serves `app` on the configured address until SIGINT or SIGTERM.
///
/// # Errors
///
/// Fails when the address cannot be bound or the accept loop errors.
pub async fn serve_http(app: Router, config: ServerConfig) -> Result<()> {
    let addr = config.server_addr();
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(source) => {
            let error = ServerError::bind_error(addr, source);
            tracing::error!(
                target: TRACING_TARGET_SERVER_STARTUP,
                error = %error,
                suggestion = error.suggestion(),
                "Bind failed"
            );
            return Err(error);
        }
    };

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.shutdown_timeout()))
        .into_future();

    serve_with_shutdown(&config, server).await
}
