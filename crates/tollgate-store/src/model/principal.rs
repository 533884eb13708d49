//! Principal model for registered identities.

use jiff::Timestamp;
use uuid::Uuid;

/// A registered identity that can authenticate with a password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Unique principal identifier.
    pub id: Uuid,
    /// Login name, unique across all principals.
    pub username: String,
    /// Password hash in PHC string format.
    pub password_hash: String,
    /// Timestamp when the principal was created.
    pub created_at: Timestamp,
}

/// Data for creating a new principal.
#[derive(Debug, Default, Clone)]
pub struct NewPrincipal {
    /// Login name, must not be taken yet.
    pub username: String,
    /// Password hash in PHC string format.
    pub password_hash: String,
}

impl Principal {
    /// Builds a stored principal from its creation data.
    pub(crate) fn from_new(new_principal: NewPrincipal) -> Self {
        Self {
            id: Uuid::now_v7(),
            username: new_principal.username,
            password_hash: new_principal.password_hash,
            created_at: Timestamp::now(),
        }
    }
}
