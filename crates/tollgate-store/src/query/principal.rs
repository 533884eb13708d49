//! Principal repository backing credential lookups.

use std::future::Future;

use crate::model::{NewPrincipal, Principal};
use crate::{PRINCIPAL_USERNAME_UNIQUE, StoreClient, StoreError, StoreResult, TRACING_TARGET_QUERY};

/// Repository for principal storage operations.
///
/// Lookups by username are exact and case-sensitive.
pub trait PrincipalRepository {
    /// Creates a new principal.
    ///
    /// Fails with [`StoreError::UniqueViolation`] if the username is
    /// already registered. The uniqueness check and the insert happen
    /// atomically.
    fn create_principal(
        &self,
        new_principal: NewPrincipal,
    ) -> impl Future<Output = StoreResult<Principal>> + Send;

    /// Finds a principal by username.
    fn find_principal_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = StoreResult<Option<Principal>>> + Send;

    /// Checks if a username is already registered.
    fn username_exists(&self, username: &str) -> impl Future<Output = StoreResult<bool>> + Send;
}

impl PrincipalRepository for StoreClient {
    async fn create_principal(&self, new_principal: NewPrincipal) -> StoreResult<Principal> {
        let mut table = self.inner.principals.write().await;

        if table.by_username.contains_key(&new_principal.username) {
            tracing::debug!(
                target: TRACING_TARGET_QUERY,
                username = %new_principal.username,
                "Rejected duplicate username"
            );
            return Err(StoreError::unique_violation(PRINCIPAL_USERNAME_UNIQUE));
        }

        let principal = Principal::from_new(new_principal);
        table
            .by_username
            .insert(principal.username.clone(), principal.id);
        table.by_id.insert(principal.id, principal.clone());

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            principal_id = %principal.id,
            "Principal created"
        );

        Ok(principal)
    }

    async fn find_principal_by_username(&self, username: &str) -> StoreResult<Option<Principal>> {
        let table = self.inner.principals.read().await;
        let principal = table
            .by_username
            .get(username)
            .and_then(|id| table.by_id.get(id))
            .cloned();

        Ok(principal)
    }

    async fn username_exists(&self, username: &str) -> StoreResult<bool> {
        let table = self.inner.principals.read().await;
        Ok(table.by_username.contains_key(username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_principal(username: &str) -> NewPrincipal {
        NewPrincipal {
            username: username.to_owned(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_owned(),
        }
    }

    #[tokio::test]
    async fn create_and_find_principal() -> anyhow::Result<()> {
        let store = StoreClient::new();
        let created = store.create_principal(new_principal("alice")).await?;

        let by_name = store.find_principal_by_username("alice").await?;
        assert_eq!(by_name, Some(created));

        assert!(store.username_exists("alice").await?);
        Ok(())
    }

    #[tokio::test]
    async fn lookup_is_case_sensitive() -> anyhow::Result<()> {
        let store = StoreClient::new();
        store.create_principal(new_principal("alice")).await?;

        assert!(store.find_principal_by_username("Alice").await?.is_none());
        assert!(store.find_principal_by_username("bob").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() -> anyhow::Result<()> {
        let store = StoreClient::new();
        store.create_principal(new_principal("alice")).await?;

        let error = store
            .create_principal(new_principal("alice"))
            .await
            .expect_err("duplicate username must fail");

        assert!(error.is_username_taken());
        assert_eq!(store.principal_count().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_registration_keeps_one_principal() -> anyhow::Result<()> {
        let store = StoreClient::new();

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.create_principal(new_principal("alice")).await })
            })
            .collect();

        let mut created = 0;
        for task in tasks {
            if task.await?.is_ok() {
                created += 1;
            }
        }

        assert_eq!(created, 1);
        assert_eq!(store.principal_count().await, 1);
        Ok(())
    }
}
