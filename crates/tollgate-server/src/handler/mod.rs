//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use aide::axum::ApiRouter;
//! use aide::axum::routing::get;
//! use tollgate_server::handler::{CustomRoutes, routes};
//! use tollgate_server::service::{ServiceConfig, ServiceState};
//!
//! async fn custom_handler() -> &'static str {
//!     "Hello from custom route!"
//! }
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ServiceConfig::with_secret("change-me-to-at-least-32-bytes-long");
//! let state = ServiceState::from_config(&config).await?;
//!
//! let custom_routes = CustomRoutes::new()
//!     .with_private_routes(ApiRouter::new().api_route("/custom-private", get(custom_handler)))
//!     .with_public_routes(ApiRouter::new().api_route("/custom-public", get(custom_handler)));
//!
//! let router = routes(custom_routes, state);
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod authentication;
mod error;
mod products;
mod request;
mod response;
mod utility;

use aide::axum::ApiRouter;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::request::{CreateProduct, Login, Register};
pub use crate::handler::response::{ErrorResponse, LoginResponse, Product, Products};
pub use crate::handler::utility::CustomRoutes;
use crate::middleware::RouterAuthExt;
use crate::service::ServiceState;

async fn not_found() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Product catalog plus custom routes; all require authentication.
fn private_routes(custom: Option<ApiRouter<ServiceState>>) -> ApiRouter<ServiceState> {
    custom
        .into_iter()
        .fold(products::routes(), |router, custom| router.merge(custom))
        .with_required_authentication()
}

/// Login, registration and custom public routes.
fn public_routes(custom: Option<ApiRouter<ServiceState>>) -> ApiRouter<ServiceState> {
    custom
        .into_iter()
        .fold(authentication::routes(), |router, custom| router.merge(custom))
}

/// Returns an [`ApiRouter`] with all routes.
///
/// The authentication gate wraps every route; only private routes reject
/// requests without an identity.
pub fn routes(routes: CustomRoutes, state: ServiceState) -> ApiRouter<ServiceState> {
    let (private, public) = routes.into_parts();

    private_routes(private)
        .merge(public_routes(public))
        .fallback(not_found)
        .with_authentication(state)
}
