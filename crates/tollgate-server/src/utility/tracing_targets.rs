//! Centralized tracing target constants for structured logging.
//!
//! Using consistent targets enables fine-grained control over log output
//! via tracing subscriber filters, e.g.
//! `RUST_LOG=tollgate_server::authentication=debug`.

/// Authentication gate decisions and token validation.
pub const TRACING_TARGET_AUTHENTICATION: &str = "tollgate_server::authentication";

/// Token issuance and signing key handling.
pub const TRACING_TARGET_TOKEN_SERVICE: &str = "tollgate_server::token_service";

/// Password hashing and verification operations.
pub const TRACING_TARGET_PASSWORD_HASHER: &str = "tollgate_server::password_hasher";

/// Login and registration handlers.
pub const TRACING_TARGET_HANDLER_AUTH: &str = "tollgate_server::handler::authentication";

/// Product catalog handlers.
pub const TRACING_TARGET_HANDLER_PRODUCTS: &str = "tollgate_server::handler::products";

/// Error recovery including middleware errors and request failures.
pub const TRACING_TARGET_RECOVERY_ERROR: &str = "tollgate_server::recovery::error";

/// Panic recovery including handler panics.
pub const TRACING_TARGET_RECOVERY_PANIC: &str = "tollgate_server::recovery::panic";

/// HTTP error responses.
pub const TRACING_TARGET_RESPONSE: &str = "tollgate_server::response";
