//! Storage error to HTTP error conversion.

use tollgate_store::StoreError;

use crate::handler::{Error, ErrorKind};
use crate::service::AuthError;

impl From<StoreError> for Error<'static> {
    fn from(error: StoreError) -> Self {
        if error.is_username_taken() {
            return AuthError::UsernameTaken.into();
        }

        match error {
            StoreError::UniqueViolation { constraint } => ErrorKind::Conflict
                .with_message("The resource already exists")
                .with_context(format!("constraint: {constraint}")),
        }
    }
}
