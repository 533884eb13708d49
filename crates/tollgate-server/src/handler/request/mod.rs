//! Request types for HTTP handlers.

mod authentication;
mod products;
mod validations;

pub use authentication::*;
pub use products::*;
