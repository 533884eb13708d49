//! Credential request types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tollgate_store::model::NewPrincipal;
use validator::Validate;

/// Request payload for login.
#[must_use]
#[derive(Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct Login {
    /// Username of the principal (1-64 characters).
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    /// Password of the principal (1-256 characters).
    #[validate(length(min = 1, max = 256))]
    pub password: String,
}

/// Request payload for registration.
#[must_use]
#[derive(Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct Register {
    /// Username of the new principal (1-64 characters).
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    /// Password of the new principal (1-256 characters).
    #[validate(length(min = 1, max = 256))]
    pub password: String,
}

impl Register {
    /// Converts this request into a [`NewPrincipal`] with the given hash.
    #[inline]
    pub fn into_model(self, password_hash: String) -> NewPrincipal {
        NewPrincipal {
            username: self.username,
            password_hash,
        }
    }
}

// Passwords stay out of logs.
macro_rules! impl_redacted_debug {
    ($($t:ident),+) => {$(
        impl std::fmt::Debug for $t {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($t))
                    .field("username", &self.username)
                    .field("password", &"<redacted>")
                    .finish()
            }
        }
    )+};
}

impl_redacted_debug!(Login, Register);
