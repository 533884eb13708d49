//! Argon2id password hashing.
//!
//! Hashes are PHC strings carrying their own salt and parameters, so the
//! store keeps them verbatim.

use std::sync::{Arc, OnceLock};

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{Error as ArgonError, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher as _, PasswordVerifier};
use rand::Rng;
use rand::distr::Alphanumeric;

use crate::handler::{Error, ErrorKind, Result};
use crate::service::AuthError;
use crate::utility::tracing_targets::TRACING_TARGET_PASSWORD_HASHER as TRACING_TARGET;

/// Hashes new passwords and checks presented ones.
///
/// Cheap to clone; the lazily built decoy hash is shared.
#[derive(Debug, Clone, Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
    decoy_hash: Arc<OnceLock<String>>,
}

/// Failure on our side, reported without detail.
fn unavailable(context: &'static str) -> Error<'static> {
    ErrorKind::InternalServerError
        .with_message("Authentication temporarily unavailable")
        .with_context(context)
        .with_resource("authentication")
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hashes `password` with a fresh random salt.
    pub fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);

        match self.argon2.hash_password(password.as_bytes(), &salt) {
            Ok(hash) => Ok(hash.to_string()),
            Err(error) => {
                tracing::error!(target: TRACING_TARGET, error = %error, "Hashing failed");
                Err(unavailable("argon2 hash_password"))
            }
        }
    }

    /// Checks `password` against a stored PHC hash.
    ///
    /// # Errors
    ///
    /// [`AuthError::AuthenticationFailed`] on mismatch, an internal
    /// error when the stored hash cannot be used.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<()> {
        let parsed = PasswordHash::new(stored_hash).map_err(|error| {
            tracing::warn!(target: TRACING_TARGET, error = %error, "Stored hash is not a PHC string");
            unavailable("unparseable stored hash")
        })?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(()),
            Err(ArgonError::Password) => Err(AuthError::AuthenticationFailed.into()),
            Err(error) => {
                tracing::error!(target: TRACING_TARGET, error = %error, "Verification failed");
                Err(unavailable("argon2 verify_password"))
            }
        }
    }

    /// Burns one verification against a decoy hash and returns `false`.
    ///
    /// Called for unknown usernames so that they take as long as a wrong
    /// password.
    pub fn verify_dummy_password(&self, password: &str) -> bool {
        let decoy = self.cached_decoy(|| {
            let decoy_password: String = rand::rng()
                .sample_iter(Alphanumeric)
                .take(24)
                .map(char::from)
                .collect();
            self.hash_password(&decoy_password)
        });

        if let Some(decoy) = decoy {
            let _ = self.verify_password(password, decoy);
        }
        false
    }

    /// Returns the cached decoy hash, building it with `build` on first use.
    ///
    /// A failed build caches nothing, so the next call tries again.
    fn cached_decoy(&self, build: impl FnOnce() -> Result<String>) -> Option<&str> {
        if let Some(decoy) = self.decoy_hash.get() {
            return Some(decoy.as_str());
        }

        match build() {
            Ok(hash) => Some(self.decoy_hash.get_or_init(|| hash).as_str()),
            Err(error) => {
                tracing::warn!(target: TRACING_TARGET, error = %error, "Skipping decoy verification");
                None
            }
        }
    }
}
