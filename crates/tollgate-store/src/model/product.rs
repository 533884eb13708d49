//! Product model for the catalog.

use bigdecimal::BigDecimal;
use jiff::Timestamp;
use uuid::Uuid;

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Unique product identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Unit price with up to two fractional digits.
    pub price: BigDecimal,
    /// Timestamp when the product was created.
    pub created_at: Timestamp,
}

/// Data for creating a new product.
#[derive(Debug, Default, Clone)]
pub struct NewProduct {
    /// Display name.
    pub name: String,
    /// Unit price with up to two fractional digits.
    pub price: BigDecimal,
}

impl Product {
    pub(crate) fn from_new(new_product: NewProduct) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: new_product.name,
            price: new_product.price,
            created_at: Timestamp::now(),
        }
    }
}
