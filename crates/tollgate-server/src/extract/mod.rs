//! Request extractors.
//!
//! - [`AuthState`] - Identity bound to the request by the authentication gate
//! - [`Json`] - JSON body with uniform error responses
//! - [`ValidateJson`] - JSON body checked with `validator`

pub mod auth;
pub mod reject;

pub use crate::extract::auth::{AuthFailure, AuthIdentity, AuthState, bearer_token};
pub use crate::extract::reject::{Json, ValidateJson};
