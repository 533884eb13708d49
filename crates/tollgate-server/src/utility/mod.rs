//! Utility modules for common functionality across the crate.

pub mod tracing_targets;

/// Maximum accepted request body size in bytes (1MB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;
