//! Error types for storage operations.

use std::borrow::Cow;

/// Name of the constraint that keeps principal usernames unique.
pub const PRINCIPAL_USERNAME_UNIQUE: &str = "principals_username_unique";

/// Specialized [`Result`] type for storage operations.
///
/// [`Result`]: std::result::Result
pub type StoreResult<T, E = StoreError> = Result<T, E>;

/// Error type for all storage operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[must_use = "storage errors should be handled appropriately"]
pub enum StoreError {
    /// A write would break a uniqueness constraint.
    #[error("Unique constraint violated: {constraint}")]
    UniqueViolation {
        /// Name of the violated constraint.
        constraint: Cow<'static, str>,
    },
}

impl StoreError {
    /// Creates a unique violation error for the named constraint.
    pub fn unique_violation(constraint: impl Into<Cow<'static, str>>) -> Self {
        Self::UniqueViolation {
            constraint: constraint.into(),
        }
    }

    /// Returns the name of the violated constraint, if any.
    pub fn constraint(&self) -> Option<&str> {
        match self {
            Self::UniqueViolation { constraint } => Some(constraint.as_ref()),
        }
    }

    /// Returns whether this error reports a duplicate principal username.
    pub fn is_username_taken(&self) -> bool {
        self.constraint() == Some(PRINCIPAL_USERNAME_UNIQUE)
    }
}
