use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Response returned after a successful login.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LoginResponse {
    /// Signed session token; send it as `Authorization: Bearer <token>`.
    pub token: String,
}

impl LoginResponse {
    /// Wraps a freshly issued token.
    pub fn new(token: String) -> Self {
        Self { token }
    }
}
