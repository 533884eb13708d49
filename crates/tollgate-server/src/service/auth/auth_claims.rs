//! Claims carried by session tokens.

use std::borrow::Cow;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Audience every session token is issued for.
pub const TOKEN_AUDIENCE: &str = "tollgate:server";

/// Issuer of every session token.
pub const TOKEN_ISSUER: &str = "tollgate";

/// Registered JWT claims of a session token.
///
/// Times are whole Unix seconds, as required by the JWT numeric date
/// format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    /// Issuer (who created and signed this token).
    #[serde(rename = "iss")]
    pub issued_by: Cow<'static, str>,
    /// Audience (who or what the token is intended for).
    #[serde(rename = "aud")]
    pub audience: Cow<'static, str>,
    /// Unique token identifier.
    #[serde(rename = "jti")]
    pub token_id: Uuid,
    /// Subject (the username the token was issued to).
    #[serde(rename = "sub")]
    pub subject: String,
    /// Issued at, in seconds since the Unix epoch.
    #[serde(rename = "iat")]
    pub issued_at: i64,
    /// Expiration time, in seconds since the Unix epoch.
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl AuthClaims {
    /// Creates claims for `subject` valid from `issued_at` until `expires_at`.
    pub fn new(subject: impl Into<String>, issued_at: Timestamp, expires_at: Timestamp) -> Self {
        Self {
            issued_by: Cow::Borrowed(TOKEN_ISSUER),
            audience: Cow::Borrowed(TOKEN_AUDIENCE),
            token_id: Uuid::new_v4(),
            subject: subject.into(),
            issued_at: issued_at.as_second(),
            expires_at: expires_at.as_second(),
        }
    }

    /// Returns whether the token is expired at `now`.
    ///
    /// A token whose expiry equals the current second is already expired.
    #[inline]
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now.as_second() >= self.expires_at
    }
}
