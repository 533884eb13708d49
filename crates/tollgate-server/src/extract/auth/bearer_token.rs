use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;

/// Case-sensitive scheme prefix of a bearer credential.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Returns the candidate token from the `Authorization` header.
///
/// Yields `None` when the header is absent, is not valid UTF-8, or does
/// not start with exactly `"Bearer "`. The remainder is returned as is,
/// which may be empty.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix(BEARER_PREFIX)
}
