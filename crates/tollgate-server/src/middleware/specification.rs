//! Serves the generated OpenAPI document and a Scalar reference UI.
//!
//! ```rust
//! use aide::axum::ApiRouter;
//! use axum::Router;
//! use tollgate_server::middleware::{OpenApiConfig, RouterOpenApiExt};
//!
//! let app: Router<()> = ApiRouter::new()
//!     .with_open_api(OpenApiConfig::default());
//! ```

use std::sync::Arc;

use aide::axum::ApiRouter;
use aide::openapi::{Info, OpenApi};
use aide::scalar::Scalar;
use axum::Json;
use axum::routing::{Router, get};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

const API_TITLE: &str = "Tollgate API";

const API_DESCRIPTION: &str = "Register a principal, exchange its credentials for a signed \
    session token, and present the token as `Authorization: Bearer <token>` to reach \
    protected routes.";

/// Where the document and the UI are mounted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct OpenApiConfig {
    #[cfg_attr(
        feature = "config",
        arg(long, env = "OPENAPI_JSON_PATH", default_value = "/api/openapi.json")
    )]
    pub open_api_json: String,

    #[cfg_attr(
        feature = "config",
        arg(long, env = "OPENAPI_SCALAR_PATH", default_value = "/api/scalar")
    )]
    pub scalar_ui: String,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            open_api_json: "/api/openapi.json".to_owned(),
            scalar_ui: "/api/scalar".to_owned(),
        }
    }
}

impl OpenApiConfig {
    /// Both paths must be absolute and distinct.
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = [&self.open_api_json, &self.scalar_ui]
            .into_iter()
            .find(|path| !path.starts_with('/'))
        {
            return Err(Error::config(format!("OpenAPI path '{path}' must start with '/'")));
        }

        if self.open_api_json == self.scalar_ui {
            return Err(Error::config("OpenAPI JSON and Scalar UI paths must differ"));
        }

        Ok(())
    }
}

/// Extension trait for [`ApiRouter`] to serve its OpenAPI document.
pub trait RouterOpenApiExt<S> {
    /// Finishes the document with the built-in [`Info`].
    fn with_open_api(self, config: OpenApiConfig) -> Router<S>;

    fn with_open_api_info(self, config: OpenApiConfig, info: Info) -> Router<S>;
}

impl<S> RouterOpenApiExt<S> for ApiRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_open_api(self, config: OpenApiConfig) -> Router<S> {
        let info = Info {
            title: API_TITLE.to_owned(),
            description: Some(API_DESCRIPTION.to_owned()),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            ..Info::default()
        };

        self.with_open_api_info(config, info)
    }

    fn with_open_api_info(self, config: OpenApiConfig, info: Info) -> Router<S> {
        let mut api = OpenApi {
            info,
            ..OpenApi::default()
        };

        // The document is complete only after `finish_api`, so the route
        // that serves it is added to the plain router afterwards.
        let router = self
            .route(&config.scalar_ui, Scalar::new(&config.open_api_json).axum_route())
            .finish_api(&mut api);

        let document = Arc::new(api);
        router.route(
            &config.open_api_json,
            get(move || {
                let document = OpenApi::clone(&document);
                async move { Json(document) }
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;

    use super::*;

    #[test]
    fn paths_must_be_absolute_and_distinct() {
        assert!(OpenApiConfig::default().validate().is_ok());

        let relative = OpenApiConfig {
            open_api_json: "openapi.json".to_owned(),
            ..OpenApiConfig::default()
        };
        assert!(relative.validate().is_err());

        let clash = OpenApiConfig {
            scalar_ui: "/api/openapi.json".to_owned(),
            ..OpenApiConfig::default()
        };
        assert!(clash.validate().is_err());
    }

    #[tokio::test]
    async fn serves_document_and_ui() -> anyhow::Result<()> {
        let router: Router = ApiRouter::new().with_open_api(OpenApiConfig::default());
        let server = TestServer::new(router)?;

        let response = server.get("/api/openapi.json").await;
        response.assert_status_ok();
        let document: serde_json::Value = response.json();
        assert_eq!(document["info"]["title"], API_TITLE);

        server.get("/api/scalar").await.assert_status_ok();
        Ok(())
    }
}
