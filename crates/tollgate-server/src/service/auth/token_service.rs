//! Issues and validates signed, time-limited session tokens.

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Header, Validation, decode, encode};

use super::{AuthClaims, AuthError, TOKEN_AUDIENCE, TOKEN_ISSUER};
use crate::service::SessionKeys;
use crate::utility::tracing_targets::TRACING_TARGET_TOKEN_SERVICE as TRACING_TARGET;
use crate::{Error, Result};

/// Issues HS256 session tokens and validates them.
///
/// Every operation is a pure function of its inputs and the immutable
/// [`SessionKeys`], so the service can be cloned into any number of
/// concurrent tasks.
///
/// Validation tolerates no clock skew: a token is expired from the first
/// second at which `now >= exp`.
#[derive(Debug, Clone)]
pub struct TokenService {
    keys: SessionKeys,
    validation: Validation,
    ttl: SignedDuration,
}

impl TokenService {
    /// Lifetime of every issued token.
    pub const TOKEN_TTL: SignedDuration = SignedDuration::from_hours(1);

    /// Creates a new token service signing with `keys`.
    pub fn new(keys: SessionKeys) -> Self {
        let mut validation = Validation::new(SessionKeys::ALGORITHM);
        validation.set_required_spec_claims(&["exp", "sub", "iss", "aud"]);
        validation.set_issuer(&[TOKEN_ISSUER]);
        validation.set_audience(&[TOKEN_AUDIENCE]);
        // Expiry is checked exactly in `validate_at`.
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;

        Self {
            keys,
            validation,
            ttl: Self::TOKEN_TTL,
        }
    }

    /// Issues a token for `subject` expiring one TTL from now.
    pub fn issue(&self, subject: &str) -> Result<String> {
        self.issue_at(subject, Timestamp::now())
    }

    /// Issues a token for `subject` as if the current time were `now`.
    pub fn issue_at(&self, subject: &str, now: Timestamp) -> Result<String> {
        if subject.is_empty() {
            return Err(Error::auth("token subject must not be empty"));
        }

        let expires_at = now.checked_add(self.ttl).map_err(|e| {
            Error::internal("token_service", "token expiry is out of range").with_source(e)
        })?;

        let claims = AuthClaims::new(subject, now, expires_at);
        let header = Header::new(SessionKeys::ALGORITHM);

        let token = encode(&header, &claims, self.keys.encoding_key()).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "Failed to sign session token",
            );

            Error::internal("token_service", "failed to sign token").with_source(e)
        })?;

        tracing::debug!(
            target: TRACING_TARGET,
            token_id = %claims.token_id,
            expires_at = claims.expires_at,
            "Session token issued",
        );

        Ok(token)
    }

    /// Validates `token` and returns the subject it was issued to.
    pub fn validate(&self, token: &str) -> Result<String, AuthError> {
        self.validate_at(token, Timestamp::now())
    }

    /// Validates `token` as if the current time were `now`.
    pub fn validate_at(&self, token: &str, now: Timestamp) -> Result<String, AuthError> {
        self.decode_claims_at(token, now).map(|claims| claims.subject)
    }

    /// Validates `token` as if the current time were `now` and returns all
    /// of its claims.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidToken`] if the token is empty, malformed,
    ///   signed with another key or algorithm, or names the wrong issuer
    ///   or audience.
    /// - [`AuthError::ExpiredToken`] if `now >= exp`.
    pub fn decode_claims_at(&self, token: &str, now: Timestamp) -> Result<AuthClaims, AuthError> {
        if token.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        let token_data = decode::<AuthClaims>(token, self.keys.decoding_key(), &self.validation)
            .map_err(|e| {
                tracing::debug!(
                    target: TRACING_TARGET,
                    error = %e,
                    "Session token rejected",
                );

                match e.kind() {
                    JwtErrorKind::ExpiredSignature => AuthError::ExpiredToken,
                    _ => AuthError::InvalidToken,
                }
            })?;

        let claims = token_data.claims;
        if claims.subject.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        if claims.is_expired_at(now) {
            tracing::debug!(
                target: TRACING_TARGET,
                token_id = %claims.token_id,
                expires_at = claims.expires_at,
                "Session token expired",
            );

            return Err(AuthError::ExpiredToken);
        }

        Ok(claims)
    }
}
