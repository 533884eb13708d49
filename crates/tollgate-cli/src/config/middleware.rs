//! Flags for the `tollgate-server` middleware stack.
//!
//! ```bash
//! tollgate --cors-origins "https://example.com" --request-timeout-secs 60
//! ```

use std::ops::RangeInclusive;

use anyhow::{Context, ensure};
use clap::Args;
use serde::{Deserialize, Serialize};
use tollgate_server::middleware::{CorsConfig, OpenApiConfig, RecoveryConfig};

use crate::TRACING_TARGET_CONFIG;

/// Accepted request timeouts, in seconds.
const REQUEST_TIMEOUT_SECS: RangeInclusive<u64> = 1..=300;

/// CORS, OpenAPI and recovery settings.
#[derive(Debug, Clone, Default, Args, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    #[clap(flatten)]
    pub cors: CorsConfig,

    #[clap(flatten)]
    pub openapi: OpenApiConfig,

    #[clap(flatten)]
    pub recovery: RecoveryConfig,
}

impl MiddlewareConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        let invalid_origins = self.cors.invalid_origins();
        ensure!(
            invalid_origins.is_empty(),
            "CORS origins are not valid header values: {invalid_origins:?}"
        );

        self.openapi.validate().context("OpenAPI paths")?;

        let timeout = self.recovery.request_timeout_secs;
        ensure!(
            REQUEST_TIMEOUT_SECS.contains(&timeout),
            "request timeout of {timeout}s is outside {REQUEST_TIMEOUT_SECS:?}"
        );
        Ok(())
    }

    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            origins = ?self.cors.allowed_origins,
            credentials = self.cors.allow_credentials,
            "CORS configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            openapi_path = %self.openapi.open_api_json,
            scalar_path = %self.openapi.scalar_ui,
            "OpenAPI configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            request_timeout_secs = self.recovery.request_timeout_secs,
            "Recovery configuration"
        );
    }
}

#[cfg(test)]
mod tests {
    use tollgate_server::middleware::RecoveryConfig;

    use super::MiddlewareConfig;

    #[test]
    fn default_config_is_valid() {
        assert!(MiddlewareConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_timeouts() {
        for secs in [0, 301] {
            let config = MiddlewareConfig {
                recovery: RecoveryConfig::with_timeout_secs(secs),
                ..MiddlewareConfig::default()
            };
            assert!(config.validate().is_err());
        }
    }
}
