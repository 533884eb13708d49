//! Product repository for the catalog.

use std::future::Future;

use crate::model::{NewProduct, Product};
use crate::{StoreClient, StoreResult, TRACING_TARGET_QUERY};

/// Repository for product storage operations.
pub trait ProductRepository {
    /// Creates a new product and returns it.
    fn create_product(
        &self,
        new_product: NewProduct,
    ) -> impl Future<Output = StoreResult<Product>> + Send;

    /// Lists all products in creation order.
    fn list_products(&self) -> impl Future<Output = StoreResult<Vec<Product>>> + Send;
}

impl ProductRepository for StoreClient {
    async fn create_product(&self, mut new_product: NewProduct) -> StoreResult<Product> {
        new_product.name = new_product.name.trim().to_owned();

        let product = Product::from_new(new_product);
        self.inner.products.write().await.push(product.clone());

        tracing::debug!(
            target: TRACING_TARGET_QUERY,
            product_id = %product.id,
            "Product created"
        );

        Ok(product)
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        Ok(self.inner.products.read().await.clone())
    }
}
