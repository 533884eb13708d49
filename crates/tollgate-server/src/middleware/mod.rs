//! Middleware for `axum::Router` and HTTP request processing.
//!
//! - Authentication gate and route-level enforcement
//! - Security (CORS, headers, body limits)
//! - Observability (request IDs, tracing spans)
//! - Recovery (panics, timeouts, service errors)
//! - OpenAPI documentation
//!
//! Layers are applied innermost first:
//!
//! ```rust,no_run
//! use axum::Router;
//! use tollgate_server::middleware::{
//!     RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt,
//! };
//!
//! let app: Router = Router::new()
//!     .with_default_security()
//!     .with_observability()
//!     .with_default_recovery();
//! ```

mod authentication;
mod observability;
mod recovery;
mod security;
mod specification;

pub use authentication::{RouterAuthExt, authenticate_request, require_authentication};
pub use observability::RouterObservabilityExt;
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{CorsConfig, RouterSecurityExt, SecurityHeadersConfig};
pub use specification::{OpenApiConfig, RouterOpenApiExt};
