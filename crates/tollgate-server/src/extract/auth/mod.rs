//! Request-scoped authentication state.
//!
//! The authentication gate resolves a bearer token once per request and
//! leaves its outcome in the request extensions: an [`AuthState`] on
//! success or an [`AuthFailure`] when a token was presented but rejected.
//! Handlers and route layers read them back through extractors.

mod auth_state;
mod bearer_token;

pub use self::auth_state::{AuthFailure, AuthIdentity, AuthState};
pub use self::bearer_token::{BEARER_PREFIX, bearer_token};
