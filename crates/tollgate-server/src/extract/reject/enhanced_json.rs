use aide::generate::GenContext;
use aide::openapi::{Operation, Response as ApiResponse};
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use derive_more::{Deref, DerefMut, From};
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::handler::{Error, ErrorKind};
use crate::utility::DEFAULT_MAX_BODY_SIZE;

/// Longest parser detail echoed back to a client.
const MAX_DETAIL_CHARS: usize = 200;

/// `axum::Json` whose rejections render as [`Error`] bodies.
///
/// Used for responses too, so the OpenAPI document sees one type.
#[must_use]
#[derive(Debug, Clone, Copy, Default, Deref, DerefMut, From)]
pub struct Json<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned + 'static,
    S: Send + Sync,
{
    type Rejection = Error<'static>;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection.into()),
        }
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

impl From<JsonRejection> for Error<'static> {
    fn from(rejection: JsonRejection) -> Self {
        let error = match &rejection {
            JsonRejection::JsonDataError(data) => ErrorKind::BadRequest.with_message(format!(
                "Invalid request data: {}",
                one_line(&data.body_text())
            )),
            JsonRejection::JsonSyntaxError(syntax) => ErrorKind::BadRequest
                .with_message("Invalid JSON syntax in request body")
                .with_context(one_line(&syntax.body_text())),
            JsonRejection::MissingJsonContentType(_) => ErrorKind::BadRequest
                .with_message("Expected a request with Content-Type: application/json"),
            JsonRejection::BytesRejection(bytes) if bytes.body_text().contains("length limit") => {
                ErrorKind::BadRequest
                    .with_message("Request body too large")
                    .with_context(format!("limit: {DEFAULT_MAX_BODY_SIZE} bytes"))
            }
            JsonRejection::BytesRejection(bytes) => ErrorKind::BadRequest
                .with_message("Failed to read request body")
                .with_context(one_line(&bytes.body_text())),
            other => {
                return ErrorKind::InternalServerError
                    .with_context(format!("unhandled JSON rejection: {other:?}"));
            }
        };

        error.with_resource("request")
    }
}

/// Collapses parser output into one bounded line.
fn one_line(detail: &str) -> String {
    detail
        .lines()
        .take(3)
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .take(MAX_DETAIL_CHARS)
        .collect()
}

impl<T: JsonSchema> aide::OperationInput for Json<T> {
    fn operation_input(ctx: &mut GenContext, operation: &mut Operation) {
        <axum::Json<T> as aide::OperationInput>::operation_input(ctx, operation);
    }

    fn inferred_early_responses(
        ctx: &mut GenContext,
        operation: &mut Operation,
    ) -> Vec<(Option<u16>, ApiResponse)> {
        <axum::Json<T> as aide::OperationInput>::inferred_early_responses(ctx, operation)
    }
}

impl<T: JsonSchema + Serialize> aide::OperationOutput for Json<T> {
    type Inner = T;

    fn operation_response(ctx: &mut GenContext, operation: &mut Operation) -> Option<ApiResponse> {
        <axum::Json<T> as aide::OperationOutput>::operation_response(ctx, operation)
    }

    fn inferred_responses(
        ctx: &mut GenContext,
        operation: &mut Operation,
    ) -> Vec<(Option<u16>, ApiResponse)> {
        <axum::Json<T> as aide::OperationOutput>::inferred_responses(ctx, operation)
    }
}
