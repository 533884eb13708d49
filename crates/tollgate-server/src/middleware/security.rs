//! CORS, hardening response headers, compression and body limits.

use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header::{self, HeaderName, HeaderValue};
use axum::http::Method;
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::utility::DEFAULT_MAX_BODY_SIZE;
use crate::utility::tracing_targets::TRACING_TARGET_RESPONSE as TRACING_TARGET;

/// Allowed when no origin is configured.
const LOOPBACK_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:8080",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:8080",
];

/// Scalar loads its bundle from jsDelivr.
const DEFAULT_CSP: &str = "default-src 'self'; \
    script-src 'self' 'unsafe-inline' https://cdn.jsdelivr.net; \
    style-src 'self' 'unsafe-inline'; \
    img-src 'self' data:; \
    connect-src 'self'; \
    frame-ancestors 'none'";

/// Extension trait for `axum::`[`Router`] to apply security middleware.
pub trait RouterSecurityExt<S> {
    /// Layers CORS, response headers, compression and body limits.
    fn with_security(self, cors: &CorsConfig, headers: &SecurityHeadersConfig) -> Self;

    fn with_default_security(self) -> Self;
}

impl<S> RouterSecurityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_security(self, cors: &CorsConfig, headers: &SecurityHeadersConfig) -> Self {
        let router = headers
            .header_values()
            .into_iter()
            .fold(self, |router, (name, value)| {
                router.layer(SetResponseHeaderLayer::overriding(name, value))
            });

        router
            .layer(cors.layer())
            .layer(CompressionLayer::new())
            .layer(RequestBodyLimitLayer::new(DEFAULT_MAX_BODY_SIZE))
            .layer(DefaultBodyLimit::max(DEFAULT_MAX_BODY_SIZE))
    }

    fn with_default_security(self) -> Self {
        self.with_security(&CorsConfig::default(), &SecurityHeadersConfig::default())
    }
}

/// Cross-origin request rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct CorsConfig {
    /// Allowed origins. Loopback origins are used when empty.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_ORIGINS", value_delimiter = ',')
    )]
    pub allowed_origins: Vec<String>,

    /// Preflight cache lifetime in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_MAX_AGE", default_value = "3600")
    )]
    pub max_age_seconds: u64,

    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_ALLOW_CREDENTIALS", default_value = "false")
    )]
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age_seconds: 3600,
            allow_credentials: false,
        }
    }
}

impl CorsConfig {
    /// Origins as header values. Unparseable entries are dropped.
    pub fn origins(&self) -> Vec<HeaderValue> {
        if self.allowed_origins.is_empty() {
            return LOOPBACK_ORIGINS.map(HeaderValue::from_static).to_vec();
        }

        self.allowed_origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect()
    }

    /// Configured origins that cannot be sent as a header.
    pub fn invalid_origins(&self) -> Vec<&str> {
        self.allowed_origins
            .iter()
            .map(String::as_str)
            .filter(|origin| HeaderValue::from_str(origin).is_err())
            .collect()
    }

    fn layer(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(self.origins())
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .allow_credentials(self.allow_credentials)
            .max_age(Duration::from_secs(self.max_age_seconds))
    }
}

/// Hardening headers added to every response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct SecurityHeadersConfig {
    /// `Strict-Transport-Security` max age; zero disables the header.
    pub hsts_max_age: Duration,
    pub hsts_include_subdomains: bool,
    pub content_security_policy: Option<String>,
    /// Sends `SAMEORIGIN` instead of `DENY` for `X-Frame-Options`.
    pub allow_same_origin_frames: bool,
}

impl Default for SecurityHeadersConfig {
    fn default() -> Self {
        Self {
            hsts_max_age: Duration::from_secs(365 * 24 * 60 * 60),
            hsts_include_subdomains: true,
            content_security_policy: Some(DEFAULT_CSP.to_owned()),
            allow_same_origin_frames: false,
        }
    }
}

impl SecurityHeadersConfig {
    /// Header pairs to set on every response.
    pub fn header_values(&self) -> Vec<(HeaderName, HeaderValue)> {
        let frame_options = if self.allow_same_origin_frames {
            "SAMEORIGIN"
        } else {
            "DENY"
        };

        let mut headers = vec![
            (header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
            (header::X_FRAME_OPTIONS, HeaderValue::from_static(frame_options)),
            (
                header::REFERRER_POLICY,
                HeaderValue::from_static("strict-origin-when-cross-origin"),
            ),
        ];

        if let Some(hsts) = self.hsts() {
            headers.push((header::STRICT_TRANSPORT_SECURITY, hsts));
        }

        if let Some(csp) = self.content_security_policy.as_deref() {
            match HeaderValue::from_str(csp) {
                Ok(value) => headers.push((header::CONTENT_SECURITY_POLICY, value)),
                Err(error) => tracing::warn!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Skipping invalid Content-Security-Policy header"
                ),
            }
        }

        headers
    }

    fn hsts(&self) -> Option<HeaderValue> {
        let max_age = self.hsts_max_age.as_secs();
        if max_age == 0 {
            return None;
        }

        let value = match self.hsts_include_subdomains {
            true => format!("max-age={max_age}; includeSubDomains"),
            false => format!("max-age={max_age}"),
        };
        HeaderValue::from_str(&value).ok()
    }
}

#[cfg(test)]
mod tests {
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;

    #[test]
    fn empty_origins_fall_back_to_loopback() {
        let origins = CorsConfig::default().origins();
        assert_eq!(origins.len(), LOOPBACK_ORIGINS.len());
    }

    #[test]
    fn detects_invalid_origins() {
        let config = CorsConfig {
            allowed_origins: vec!["https://app.example.com".into(), "bad\norigin".into()],
            ..CorsConfig::default()
        };
        assert_eq!(config.invalid_origins(), vec!["bad\norigin"]);
        assert_eq!(config.origins().len(), 1);
    }

    #[test]
    fn hsts_follows_config() {
        let config = SecurityHeadersConfig {
            hsts_include_subdomains: false,
            ..SecurityHeadersConfig::default()
        };
        assert_eq!(config.hsts(), Some(HeaderValue::from_static("max-age=31536000")));

        let disabled = SecurityHeadersConfig {
            hsts_max_age: Duration::ZERO,
            ..SecurityHeadersConfig::default()
        };
        assert!(
            disabled
                .header_values()
                .iter()
                .all(|(name, _)| *name != header::STRICT_TRANSPORT_SECURITY)
        );
    }

    #[tokio::test]
    async fn responses_carry_security_headers() -> anyhow::Result<()> {
        let router = Router::new()
            .route("/", get(|| async { "ok" }))
            .with_default_security();
        let server = TestServer::new(router)?;

        let response = server.get("/").await;
        assert_eq!(response.header(header::X_CONTENT_TYPE_OPTIONS), "nosniff");
        assert_eq!(response.header(header::X_FRAME_OPTIONS), "DENY");
        assert!(response.headers().contains_key(header::STRICT_TRANSPORT_SECURITY));
        assert!(response.headers().contains_key(header::CONTENT_SECURITY_POLICY));
        Ok(())
    }
}
