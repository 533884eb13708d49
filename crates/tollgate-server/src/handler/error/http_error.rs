//! Handler error type.
//!
//! An [`Error`] is an [`ErrorKind`] plus optional overrides. Rendering
//! starts from the kind's [`ErrorResponse`] template and applies them;
//! `context` only reaches the logs.

use std::borrow::Cow;
use std::fmt;

use aide::generate::GenContext;
use aide::openapi::Operation;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::handler::response::ErrorResponse;

/// Specialized [`Result`] for handlers.
///
/// [`Result`]: std::result::Result
pub type Result<T, E = Error<'static>> = std::result::Result<T, E>;

/// Failure returned from a handler or extractor.
#[derive(Debug, Clone, Default)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error<'a> {
    kind: ErrorKind,
    message: Option<Cow<'a, str>>,
    resource: Option<Cow<'a, str>>,
    context: Option<Cow<'a, str>>,
}

impl<'a> Error<'a> {
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            resource: None,
            context: None,
        }
    }

    /// Overrides the template message shown to the client.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Names the kind of entity involved, e.g. `principal`.
    pub fn with_resource(mut self, resource: impl Into<Cow<'a, str>>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Adds detail for the server log. Never serialized.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        self.context = Some(context.into());
        self
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[inline]
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Renders the body this error produces.
    pub fn to_response(&self) -> ErrorResponse<'_> {
        let mut response = self.kind.response();
        if let Some(message) = self.message.as_deref() {
            response = response.with_message(message);
        }
        if let Some(resource) = self.resource.as_deref() {
            response = response.with_resource(resource);
        }
        if let Some(context) = self.context.as_deref() {
            response = response.with_context(context);
        }
        response
    }
}

impl fmt::Display for Error<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.to_response();
        write!(f, "{} ({}): {}", response.name, response.status, response.message)?;

        match (&response.resource, &response.context) {
            (Some(resource), Some(context)) => write!(f, " [{resource}] {context}"),
            (Some(resource), None) => write!(f, " [{resource}]"),
            (None, Some(context)) => write!(f, " {context}"),
            (None, None) => Ok(()),
        }
    }
}

impl std::error::Error for Error<'_> {}

impl IntoResponse for Error<'_> {
    fn into_response(self) -> Response {
        self.to_response().into_response()
    }
}

impl aide::OperationOutput for Error<'_> {
    type Inner = ErrorResponse<'static>;

    fn operation_response(
        ctx: &mut GenContext,
        operation: &mut Operation,
    ) -> Option<aide::openapi::Response> {
        <Json<ErrorResponse<'static>> as aide::OperationOutput>::operation_response(ctx, operation)
    }
}

impl From<ErrorKind> for Error<'_> {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// Every error the HTTP layer can answer with.
///
/// Each kind maps to one status code and one stable `name`.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// `400`, request body failed validation or a username is taken.
    BadRequest,
    /// `401`, protected route called without credentials.
    MissingAuthToken,
    /// `401`, bearer token could not be verified.
    MalformedAuthToken,
    /// `401`, bearer token is past `exp`.
    ExpiredAuthToken,
    /// `401`, credentials or token subject rejected.
    Unauthorized,
    NotFound,
    Conflict,
    #[default]
    InternalServerError,
}

impl ErrorKind {
    #[inline]
    pub fn with_message<'a>(self, message: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_message(message)
    }

    #[inline]
    pub fn with_resource<'a>(self, resource: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_resource(resource)
    }

    #[inline]
    pub fn with_context<'a>(self, context: impl Into<Cow<'a, str>>) -> Error<'a> {
        Error::new(self).with_context(context)
    }

    /// Response template for this kind.
    pub fn response(self) -> ErrorResponse<'static> {
        match self {
            Self::BadRequest => ErrorResponse::BAD_REQUEST,
            Self::MissingAuthToken => ErrorResponse::MISSING_AUTH_TOKEN
                .with_suggestion("Send an 'Authorization: Bearer <token>' header"),
            Self::MalformedAuthToken => ErrorResponse::MALFORMED_AUTH_TOKEN,
            Self::ExpiredAuthToken => ErrorResponse::TOKEN_EXPIRED
                .with_suggestion("Log in again to obtain a new token"),
            Self::Unauthorized => ErrorResponse::UNAUTHORIZED,
            Self::NotFound => ErrorResponse::NOT_FOUND,
            Self::Conflict => ErrorResponse::CONFLICT,
            Self::InternalServerError => ErrorResponse::INTERNAL_SERVER_ERROR,
        }
    }

    #[inline]
    pub fn status_code(self) -> StatusCode {
        self.response().status
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.response().name)
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        self.response().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [ErrorKind; 8] = [
        ErrorKind::BadRequest,
        ErrorKind::MissingAuthToken,
        ErrorKind::MalformedAuthToken,
        ErrorKind::ExpiredAuthToken,
        ErrorKind::Unauthorized,
        ErrorKind::NotFound,
        ErrorKind::Conflict,
        ErrorKind::InternalServerError,
    ];

    #[test]
    fn default_is_internal() {
        let error = Error::default();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn overrides_are_kept() {
        let error = ErrorKind::BadRequest
            .with_message("Username is already taken")
            .with_resource("principal")
            .with_context("username: alice");

        assert_eq!(error.message(), Some("Username is already taken"));
        assert_eq!(error.resource(), Some("principal"));
        assert_eq!(error.context(), Some("username: alice"));

        let response = error.to_response();
        assert_eq!(response.name, "bad_request");
        assert_eq!(response.message, "Username is already taken");
    }

    #[test]
    fn display_names_kind_and_status() {
        let error = ErrorKind::NotFound
            .with_message("Product not found")
            .with_resource("product");

        assert_eq!(
            error.to_string(),
            "not_found (404 Not Found): Product not found [product]"
        );
    }

    #[test]
    fn kinds_have_distinct_names() {
        let names: std::collections::HashSet<_> =
            KINDS.iter().map(|kind| kind.to_string()).collect();
        assert_eq!(names.len(), KINDS.len());
        assert_eq!(ErrorKind::ExpiredAuthToken.to_string(), "token_expired");

        for kind in KINDS {
            assert!(kind.status_code().is_client_error() || kind.status_code().is_server_error());
            assert_eq!(kind.into_response().status(), kind.status_code());
        }
    }
}
