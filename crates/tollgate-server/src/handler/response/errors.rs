use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use schemars::JsonSchema;
use serde::Serialize;

use crate::utility::tracing_targets::TRACING_TARGET_RESPONSE as TRACING_TARGET;

/// JSON body shared by every failed request.
///
/// `name` is stable and machine-readable; `message` is safe to show to
/// users. `context` and `status` stay on the server.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ErrorResponse<'a> {
    /// Stable error identifier, e.g. `token_expired`.
    pub name: Cow<'a, str>,
    /// Human-readable description.
    pub message: Cow<'a, str>,
    /// Kind of entity the failure concerns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Cow<'a, str>>,
    /// What the client could do differently.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Cow<'a, str>>,

    #[serde(skip)]
    pub context: Option<Cow<'a, str>>,
    #[serde(skip)]
    pub status: StatusCode,
}

macro_rules! templates {
    ($($(#[$doc:meta])* $ident:ident = $status:ident, $name:literal, $message:literal;)+) => {
        impl ErrorResponse<'static> {
            $(
                $(#[$doc])*
                pub const $ident: Self = Self::new($name, $message, StatusCode::$status);
            )+
        }
    };
}

templates! {
    /// Request body or parameters failed validation.
    BAD_REQUEST = BAD_REQUEST, "bad_request", "Invalid request data.";
    /// Write rejected by a uniqueness or state constraint.
    CONFLICT = CONFLICT, "conflict", "Resource state conflict.";
    INTERNAL_SERVER_ERROR = INTERNAL_SERVER_ERROR, "internal_server_error", "Internal server error.";
    /// Bearer token present but unparseable or wrongly signed.
    MALFORMED_AUTH_TOKEN = UNAUTHORIZED, "malformed_auth_token", "Malformed auth token.";
    /// Protected route called without an `Authorization` header.
    MISSING_AUTH_TOKEN = UNAUTHORIZED, "missing_auth_token", "Missing auth token.";
    NOT_FOUND = NOT_FOUND, "not_found", "Resource not found.";
    /// Bearer token past its expiry.
    TOKEN_EXPIRED = UNAUTHORIZED, "token_expired", "Token expired.";
    UNAUTHORIZED = UNAUTHORIZED, "unauthorized", "Invalid credentials.";
}

impl<'a> ErrorResponse<'a> {
    /// Creates a response template.
    #[inline]
    pub const fn new(name: &'a str, message: &'a str, status: StatusCode) -> Self {
        Self {
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
            resource: None,
            suggestion: None,
            context: None,
            status,
        }
    }

    /// Replaces the template message.
    pub fn with_message(self, message: impl Into<Cow<'a, str>>) -> Self {
        Self {
            message: message.into(),
            ..self
        }
    }

    /// Sets the resource the error concerns.
    pub fn with_resource(self, resource: impl Into<Cow<'a, str>>) -> Self {
        Self {
            resource: Some(resource.into()),
            ..self
        }
    }

    /// Attaches server-side context for the log line.
    pub fn with_context(self, context: impl Into<Cow<'a, str>>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }

    /// Attaches a suggestion for the client.
    pub fn with_suggestion(self, suggestion: impl Into<Cow<'a, str>>) -> Self {
        Self {
            suggestion: Some(suggestion.into()),
            ..self
        }
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        ErrorResponse::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    fn into_response(self) -> Response {
        tracing::debug!(
            target: TRACING_TARGET,
            status = self.status.as_u16(),
            name = %self.name,
            resource = self.resource.as_deref(),
            context = self.context.as_deref(),
            "Responding with error"
        );

        (self.status, Json(self)).into_response()
    }
}
