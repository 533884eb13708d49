//! Response types for HTTP handlers.

mod authentication;
mod errors;
mod products;

pub use authentication::*;
pub use errors::*;
pub use products::*;
