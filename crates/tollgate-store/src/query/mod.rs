//! Repository traits and their [`StoreClient`] implementations.
//!
//! [`StoreClient`]: crate::StoreClient

pub mod principal;
pub mod product;

pub use principal::PrincipalRepository;
pub use product::ProductRepository;
