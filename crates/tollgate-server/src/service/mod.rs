//! Application state and dependency injection.

mod auth;
mod config;
mod security;
mod service_state;

pub use crate::service::auth::{
    AuthClaims, AuthError, TOKEN_AUDIENCE, TOKEN_ISSUER, TokenService,
};
pub use crate::service::config::ServiceConfig;
pub use crate::service::security::{PasswordHasher, SessionKeys};
pub use crate::service::service_state::ServiceState;
// Re-export error types from crate root for convenience
pub use crate::{Error, Result};
