#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Tracing target constants for consistent logging.

/// Tracing target for client-related operations.
///
/// Use this target for logging client initialization and lifecycle events.
pub const TRACING_TARGET_CLIENT: &str = "tollgate_store::client";

/// Tracing target for repository query operations.
pub const TRACING_TARGET_QUERY: &str = "tollgate_store::queries";

mod client;
mod error;
pub mod model;
pub mod query;

pub use crate::client::StoreClient;
pub use crate::error::{PRINCIPAL_USERNAME_UNIQUE, StoreError, StoreResult};
