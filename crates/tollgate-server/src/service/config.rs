use std::fmt;
use std::path::PathBuf;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::service::{Result, SessionKeys};
use crate::{Error, utility::tracing_targets::TRACING_TARGET_TOKEN_SERVICE as TRACING_TARGET};

/// App [`state`] configuration.
///
/// The session secret has no default: it must be supplied either inline
/// or as a path to a file containing it.
///
/// [`state`]: crate::service::ServiceState
#[derive(Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// HMAC secret used to sign session tokens (at least 32 bytes).
    #[cfg_attr(
        feature = "config",
        arg(long, env = "AUTH_SECRET", hide_env_values = true)
    )]
    #[serde(default, skip_serializing)]
    pub auth_secret: Option<String>,

    /// File containing the HMAC secret used to sign session tokens.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "AUTH_SECRET_FILE", conflicts_with = "auth_secret")
    )]
    #[serde(default)]
    pub auth_secret_file: Option<PathBuf>,
}

impl ServiceConfig {
    /// Creates a configuration with an inline secret.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            auth_secret: Some(secret.into()),
            auth_secret_file: None,
        }
    }

    /// Checks that exactly one secret source is configured.
    pub fn validate(&self) -> Result<()> {
        match (&self.auth_secret, &self.auth_secret_file) {
            (Some(_), Some(_)) => Err(Error::config(
                "Provide either an auth secret or an auth secret file, not both",
            )),
            (None, None) => Err(Error::config(
                "An auth secret is required (set AUTH_SECRET or AUTH_SECRET_FILE)",
            )),
            _ => Ok(()),
        }
    }

    /// Loads the session keys from the configured source.
    pub async fn load_session_keys(&self) -> Result<SessionKeys> {
        self.validate()?;

        match (&self.auth_secret, &self.auth_secret_file) {
            (Some(secret), _) => SessionKeys::from_secret(secret),
            (None, Some(path)) => SessionKeys::from_file(path).await,
            (None, None) => Err(Error::config("An auth secret is required")),
        }
    }

    /// Logs configuration at info level without revealing the secret.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET,
            inline_secret = self.auth_secret.is_some(),
            secret_file = ?self.auth_secret_file,
            "Service configuration"
        );
    }
}

impl fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("auth_secret", &self.auth_secret.as_ref().map(|_| "<redacted>"))
            .field("auth_secret_file", &self.auth_secret_file)
            .finish()
    }
}
