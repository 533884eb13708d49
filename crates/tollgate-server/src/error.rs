//! Errors raised outside a single request: startup configuration, key
//! material and token signing.
//!
//! Handlers turn these into HTTP errors through `From`.

use std::borrow::Cow;
use std::fmt;

use tollgate_store::StoreError;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Broad category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid or missing startup settings.
    Config,
    /// Token inputs rejected before signing.
    Auth,
    Store,
    /// A bug or a failing dependency.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Config => "config",
            Self::Auth => "auth",
            Self::Store => "store",
            Self::Internal => "internal",
        })
    }
}

/// Service failure with a category, a message and an optional cause.
#[derive(Debug, thiserror::Error)]
#[error("{kind} error: {message}")]
pub struct Error {
    kind: ErrorKind,
    message: Cow<'static, str>,
    #[source]
    source: Option<BoxedError>,
}

impl Error {
    fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn config(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn auth(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorKind::Auth, message)
    }

    /// Internal failure attributed to `component`, e.g. `token_service`.
    pub fn internal(component: &str, message: impl fmt::Display) -> Self {
        Self::new(ErrorKind::Internal, format!("{component}: {message}"))
    }

    /// Records the underlying cause.
    pub fn with_source(self, source: impl Into<BoxedError>) -> Self {
        Self {
            source: Some(source.into()),
            ..self
        }
    }

    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<StoreError> for Error {
    fn from(error: StoreError) -> Self {
        Self::new(ErrorKind::Store, error.to_string()).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn display_includes_kind() {
        let error = Error::config("secret key is too short");
        assert_eq!(error.kind(), ErrorKind::Config);
        assert_eq!(error.message(), "secret key is too short");
        assert_eq!(error.to_string(), "config error: secret key is too short");
    }

    #[test]
    fn store_errors_keep_their_cause() {
        let error = Error::from(StoreError::unique_violation("principals_username_unique"));

        assert_eq!(error.kind(), ErrorKind::Store);
        assert!(error.source().is_some());
    }

    #[test]
    fn internal_errors_name_the_component() {
        let error = Error::internal("token_service", "signing failed");

        assert_eq!(error.kind(), ErrorKind::Internal);
        assert_eq!(error.message(), "token_service: signing failed");
    }
}
