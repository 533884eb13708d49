//! Service error to HTTP error conversion.
//!
//! Service failures are never the client's fault: they map to `500` and
//! the service message stays in the internal context.

use crate::handler::{Error, ErrorKind};
use crate::utility::tracing_targets::TRACING_TARGET_RESPONSE as TRACING_TARGET;

impl From<crate::Error> for Error<'static> {
    fn from(error: crate::Error) -> Self {
        use crate::ErrorKind as ServiceErrorKind;

        match error.kind() {
            ServiceErrorKind::Config => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    "Invalid service configuration"
                );
            }
            ServiceErrorKind::Auth | ServiceErrorKind::Store | ServiceErrorKind::Internal => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %error,
                    error_kind = %error.kind(),
                    "Service operation failed"
                );
            }
        }

        ErrorKind::InternalServerError.with_context(error.message().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::*;

    #[test]
    fn service_errors_are_internal() {
        let error = Error::from(crate::Error::internal("token_service", "signing failed"));

        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(error.context(), Some("token_service: signing failed"));
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
