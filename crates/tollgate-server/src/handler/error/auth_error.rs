//! Authentication error to HTTP error conversion.

use crate::handler::{Error, ErrorKind};
use crate::service::AuthError;

impl From<AuthError> for Error<'static> {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidToken => ErrorKind::MalformedAuthToken
                .with_message("The provided token is not valid")
                .with_resource("authentication"),
            AuthError::ExpiredToken => ErrorKind::ExpiredAuthToken
                .with_message("The provided token has expired")
                .with_resource("authentication"),
            AuthError::AuthenticationFailed => ErrorKind::Unauthorized
                .with_message("Invalid username or password")
                .with_resource("authentication"),
            AuthError::UsernameTaken => ErrorKind::BadRequest
                .with_message("Username is already taken")
                .with_resource("principal"),
            AuthError::PrincipalNotFound => ErrorKind::Unauthorized
                .with_context("Token subject does not resolve to a principal")
                .with_resource("authentication"),
        }
    }
}
