//! Shared in-memory storage client.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::TRACING_TARGET_CLIENT;
use crate::model::{Principal, Product};

/// Principal records with a username index.
#[derive(Debug, Default)]
pub(crate) struct PrincipalTable {
    pub(crate) by_id: HashMap<Uuid, Principal>,
    pub(crate) by_username: HashMap<String, Uuid>,
}

/// Inner data for [`StoreClient`].
#[derive(Default)]
pub(crate) struct StoreInner {
    pub(crate) principals: RwLock<PrincipalTable>,
    pub(crate) products: RwLock<Vec<Product>>,
}

/// Storage client holding principals and products.
///
/// Cloning is cheap: all clones share the same tables. Readers run
/// concurrently, writers take an exclusive lock for the whole
/// check-then-insert sequence.
#[derive(Clone, Default)]
pub struct StoreClient {
    pub(crate) inner: Arc<StoreInner>,
}

impl StoreClient {
    /// Creates a new, empty storage client.
    pub fn new() -> Self {
        tracing::info!(target: TRACING_TARGET_CLIENT, "Initializing in-memory store");
        Self::default()
    }

    /// Returns the number of stored principals.
    pub async fn principal_count(&self) -> usize {
        self.inner.principals.read().await.by_id.len()
    }

    /// Returns the number of stored products.
    pub async fn product_count(&self) -> usize {
        self.inner.products.read().await.len()
    }
}

impl fmt::Debug for StoreClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreClient").finish_non_exhaustive()
    }
}
