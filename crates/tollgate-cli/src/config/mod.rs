//! Command-line and environment configuration.
//!
//! ```text
//! Cli
//! ├── server: ServerConfig         # host, port, shutdown timeout
//! ├── middleware: MiddlewareConfig # CORS, OpenAPI paths, request timeout
//! ├── service: ServiceConfig       # token signing secret
//! └── log_format: LogFormat        # text or json
//! ```
//!
//! Every flag has an environment fallback:
//!
//! ```bash
//! tollgate --auth-secret-file /run/secrets/tollgate --port 8080
//! AUTH_SECRET_FILE=/run/secrets/tollgate PORT=8080 tollgate
//! ```

mod middleware;
mod server;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use tollgate_server::service::ServiceConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::prelude::*;

pub use self::middleware::MiddlewareConfig;
pub use self::server::ServerConfig;
use crate::TRACING_TARGET_SERVER_STARTUP;

/// Filter used when `RUST_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Colored, human-readable lines.
    #[default]
    Text,
    /// Newline-delimited JSON events.
    Json,
}

/// Everything `tollgate` can be told at startup.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "tollgate", version, about = "Tollgate authentication and catalog server")]
pub struct Cli {
    #[clap(flatten)]
    pub server: ServerConfig,

    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    #[clap(flatten)]
    pub service: ServiceConfig,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Cli {
    /// Parses arguments after loading `.env`, so its values act as
    /// environment fallbacks.
    pub fn init() -> Self {
        #[cfg(feature = "dotenv")]
        if let Err(error) = dotenvy::dotenv()
            && !error.not_found()
        {
            eprintln!("warning: ignoring unreadable .env file: {error}");
        }

        Self::parse()
    }

    /// Installs the global subscriber. `RUST_LOG` overrides the level.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
        let subscriber = tracing_subscriber::registry().with(filter);

        match self.log_format {
            LogFormat::Text => subscriber.with(layer()).init(),
            LogFormat::Json => subscriber.with(layer().json()).init(),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.server.validate().context("server configuration")?;
        self.middleware
            .validate()
            .context("middleware configuration")?;
        self.service.validate().context("service configuration")?;
        Ok(())
    }

    /// Logs every section. Secrets are never printed.
    pub fn log(&self) {
        let features: Vec<&str> = [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect();

        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            pid = std::process::id(),
            target_os = std::env::consts::OS,
            target_arch = std::env::consts::ARCH,
            ?features,
            log_format = ?self.log_format,
            "Build information"
        );

        self.server.log();
        self.middleware.log();
        self.service.log();
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, LogFormat};

    const SECRET: &str = "cli-test-secret-that-is-long-enough";

    #[test]
    fn defaults_apply_with_only_a_secret() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["tollgate", "--auth-secret", SECRET])?;

        assert_eq!(cli.server.port, 3000);
        assert_eq!(cli.log_format, LogFormat::Text);
        assert_eq!(cli.middleware.recovery.request_timeout_secs, 30);
        assert_eq!(cli.middleware.openapi.open_api_json, "/api/openapi.json");
        cli.validate()?;
        Ok(())
    }

    #[test]
    fn json_logs_and_custom_port() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from([
            "tollgate",
            "--auth-secret",
            SECRET,
            "--log-format",
            "json",
            "-p",
            "8080",
        ])?;

        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.server.port, 8080);
        Ok(())
    }

    #[test]
    fn secret_sources_are_exclusive() {
        let result = Cli::try_parse_from([
            "tollgate",
            "--auth-secret",
            SECRET,
            "--auth-secret-file",
            "/run/secrets/tollgate",
        ]);
        assert!(result.is_err());
    }
}
