//! Storage models.
//!
//! - [`Principal`] - Registered identity with its password hash
//! - [`Product`] - Catalog entry

mod principal;
mod product;

pub use principal::{NewPrincipal, Principal};
pub use product::{NewProduct, Product};
