//! Symmetric signing keys for session tokens.
//!
//! The HMAC secret is read once at startup, either inline from
//! configuration or from a file, and held immutably for the lifetime of
//! the process.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};

use crate::utility::tracing_targets::TRACING_TARGET_TOKEN_SERVICE as TRACING_TARGET;
use crate::{Error, Result};

/// Secret keys used for signing and verifying session tokens.
///
/// Cloning is cheap and every clone shares the same key material.
#[derive(Clone)]
pub struct SessionKeys {
    inner: Arc<SessionKeysInner>,
}

struct SessionKeysInner {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
}

impl SessionKeys {
    /// Signing algorithm used for every session token.
    pub const ALGORITHM: Algorithm = Algorithm::HS256;

    /// Minimum accepted secret length in bytes.
    pub const MIN_SECRET_LEN: usize = 32;

    /// Creates session keys from raw secret material.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the secret is blank or shorter
    /// than [`MIN_SECRET_LEN`] bytes.
    ///
    /// [`MIN_SECRET_LEN`]: Self::MIN_SECRET_LEN
    pub fn from_secret(secret: impl AsRef<[u8]>) -> Result<Self> {
        let secret = secret.as_ref();
        Self::validate_secret(secret)?;

        let inner = SessionKeysInner {
            decoding_key: DecodingKey::from_secret(secret),
            encoding_key: EncodingKey::from_secret(secret),
        };

        tracing::info!(
            target: TRACING_TARGET,
            secret_len = secret.len(),
            "Session keys loaded",
        );

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Reads the secret from a file and creates session keys from it.
    ///
    /// Leading and trailing whitespace is stripped, so files ending with
    /// a newline work as expected.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        tracing::debug!(
            target: TRACING_TARGET,
            path = %path.display(),
            "Loading session secret from file",
        );

        let contents = tokio::fs::read(path).await.map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                path = %path.display(),
                error = %e,
                "Failed to read session secret file",
            );

            Error::config(format!("cannot read secret file {}", path.display())).with_source(e)
        })?;

        Self::from_secret(contents.trim_ascii())
    }

    /// Returns a reference to the decoding key.
    #[inline]
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.inner.decoding_key
    }

    /// Returns a reference to the encoding key.
    #[inline]
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.inner.encoding_key
    }

    fn validate_secret(secret: &[u8]) -> Result<()> {
        if secret.iter().all(u8::is_ascii_whitespace) {
            return Err(Error::config("Session secret must not be blank"));
        }

        if secret.len() < Self::MIN_SECRET_LEN {
            return Err(Error::config(format!(
                "Session secret must be at least {} bytes, got {}",
                Self::MIN_SECRET_LEN,
                secret.len()
            )));
        }

        Ok(())
    }
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeys")
            .field("algorithm", &Self::ALGORITHM)
            .field("decoding_key", &"<redacted>")
            .field("encoding_key", &"<redacted>")
            .finish()
    }
}
