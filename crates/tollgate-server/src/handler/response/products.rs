use bigdecimal::BigDecimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a catalog product.
#[must_use]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Product {
    /// Unique product identifier.
    pub id: Uuid,
    /// Display name of the product.
    pub name: String,
    /// Unit price with two fractional digits.
    #[schemars(with = "String")]
    pub price: BigDecimal,
}

impl From<tollgate_store::model::Product> for Product {
    fn from(product: tollgate_store::model::Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
        }
    }
}

/// Response for listing products.
pub type Products = Vec<Product>;
