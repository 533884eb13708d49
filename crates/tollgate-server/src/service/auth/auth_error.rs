use thiserror::Error;

/// Authentication failures shared by the token service, the
/// authentication gate and the credential handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum AuthError {
    /// The token is absent, malformed, or its signature does not verify.
    #[error("invalid token")]
    InvalidToken,
    /// The token verified but its expiry is not in the future.
    #[error("expired token")]
    ExpiredToken,
    /// Unknown username or wrong password.
    #[error("authentication failed")]
    AuthenticationFailed,
    /// A principal with the requested username already exists.
    #[error("username already taken")]
    UsernameTaken,
    /// A valid token names a subject that no longer resolves.
    #[error("principal not found")]
    PrincipalNotFound,
}

impl AuthError {
    /// Returns a stable identifier suitable for structured logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidToken => "invalid_token",
            Self::ExpiredToken => "expired_token",
            Self::AuthenticationFailed => "authentication_failed",
            Self::UsernameTaken => "username_taken",
            Self::PrincipalNotFound => "principal_not_found",
        }
    }
}
