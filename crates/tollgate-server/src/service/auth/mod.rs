//! Session token issuance and validation.

mod auth_claims;
mod auth_error;
mod token_service;

pub use auth_claims::{AuthClaims, TOKEN_AUDIENCE, TOKEN_ISSUER};
pub use auth_error::AuthError;
pub use token_service::TokenService;
