//! Authenticated identity extractor.
//!
//! ```rust,ignore
//! use tollgate_server::extract::AuthState;
//!
//! // Rejects with 401 when the gate bound no identity.
//! async fn protected(AuthState(identity): AuthState) -> String {
//!     format!("Hello, {}", identity.username)
//! }
//!
//! // Never rejects.
//! async fn optional(auth_state: Option<AuthState>) -> &'static str {
//!     match auth_state {
//!         Some(_) => "Hello, principal",
//!         None => "Hello, anonymous",
//!     }
//! }
//! ```

use std::collections::BTreeSet;

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use derive_more::Deref;
use tollgate_store::model::Principal;
use uuid::Uuid;

use crate::handler::{Error, ErrorKind};
use crate::service::AuthError;
use crate::utility::tracing_targets::TRACING_TARGET_AUTHENTICATION as TRACING_TARGET;

/// Identity of the principal that sent the request.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthIdentity {
    /// Identifier of the principal.
    pub principal_id: Uuid,
    /// Username the token was issued for.
    pub username: String,
    /// Granted capabilities; always empty for now.
    pub capabilities: BTreeSet<String>,
}

impl AuthIdentity {
    /// Creates an identity for a resolved principal with no capabilities.
    pub fn from_principal(principal: &Principal) -> Self {
        Self {
            principal_id: principal.id,
            username: principal.username.clone(),
            capabilities: BTreeSet::new(),
        }
    }
}

/// Verified identity bound to the current request.
///
/// Inserted into the request extensions by the authentication gate.
/// Extraction fails with `401` when it is absent; the error kind reflects
/// why, using the [`AuthFailure`] left by the gate.
#[must_use]
#[derive(Debug, Clone, Deref, PartialEq, Eq)]
pub struct AuthState(pub AuthIdentity);

/// Reason a presented bearer token did not yield an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthFailure(pub AuthError);

impl AuthState {
    /// Builds the rejection for a request that carries no identity.
    fn rejection(parts: &Parts) -> Error<'static> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return ErrorKind::MissingAuthToken
                .with_message("Authentication required")
                .with_resource("authentication");
        }

        match parts.extensions.get::<AuthFailure>() {
            Some(AuthFailure(auth_error)) => Error::from(*auth_error),
            None => ErrorKind::Unauthorized
                .with_context("Authorization header does not carry a bearer token")
                .with_resource("authentication"),
        }
    }
}

impl<S> FromRequestParts<S> for AuthState
where
    S: Sync + Send,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(auth_state) = parts.extensions.get::<Self>() {
            return Ok(auth_state.clone());
        }

        let error = Self::rejection(parts);
        tracing::debug!(
            target: TRACING_TARGET,
            path = %parts.uri.path(),
            error_kind = %error.kind(),
            "Rejected unauthenticated request"
        );

        Err(error)
    }
}

impl<S> OptionalFromRequestParts<S> for AuthState
where
    S: Sync + Send,
{
    type Rejection = Error<'static>;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts.extensions.get::<Self>().cloned())
    }
}

impl aide::OperationInput for AuthState {}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderValue, Request};

    use super::*;

    fn parts(authorization: Option<&'static str>) -> anyhow::Result<Parts> {
        let mut builder = Request::builder().uri("/products");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, HeaderValue::from_static(value));
        }
        let (parts, _) = builder.body(())?.into_parts();
        Ok(parts)
    }

    fn identity() -> AuthIdentity {
        AuthIdentity {
            principal_id: Uuid::now_v7(),
            username: "alice".into(),
            capabilities: BTreeSet::new(),
        }
    }

    #[tokio::test]
    async fn extracts_bound_identity() -> anyhow::Result<()> {
        let mut parts = parts(Some("Bearer token"))?;
        parts.extensions.insert(AuthState(identity()));

        let AuthState(bound) =
            <AuthState as FromRequestParts<()>>::from_request_parts(&mut parts, &()).await?;
        assert_eq!(bound.username, "alice");
        assert!(bound.capabilities.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn missing_header_is_missing_token() -> anyhow::Result<()> {
        let mut parts = parts(None)?;
        let error = <AuthState as FromRequestParts<()>>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::MissingAuthToken);
        Ok(())
    }

    #[tokio::test]
    async fn recorded_failure_selects_error() -> anyhow::Result<()> {
        let cases = [
            (AuthError::ExpiredToken, ErrorKind::ExpiredAuthToken),
            (AuthError::InvalidToken, ErrorKind::MalformedAuthToken),
            (AuthError::PrincipalNotFound, ErrorKind::Unauthorized),
        ];

        for (failure, kind) in cases {
            let mut parts = parts(Some("Bearer token"))?;
            parts.extensions.insert(AuthFailure(failure));

            let error = <AuthState as FromRequestParts<()>>::from_request_parts(&mut parts, &())
                .await
                .unwrap_err();
            assert_eq!(error.kind(), kind);
        }
        Ok(())
    }

    #[tokio::test]
    async fn foreign_scheme_is_unauthorized() -> anyhow::Result<()> {
        let mut parts = parts(Some("bearer token"))?;
        let error = <AuthState as FromRequestParts<()>>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Unauthorized);
        Ok(())
    }

    #[tokio::test]
    async fn optional_extraction_never_rejects() -> anyhow::Result<()> {
        let mut parts = parts(None)?;
        let auth_state =
            <AuthState as OptionalFromRequestParts<()>>::from_request_parts(&mut parts, &())
                .await?;
        assert!(auth_state.is_none());
        Ok(())
    }
}
