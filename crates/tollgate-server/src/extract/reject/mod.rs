//! Request extractors with uniform JSON rejections.
//!
//! Drop-in replacements for their `axum` counterparts whose failures
//! render as [`Error`] responses.
//!
//! [`Error`]: crate::handler::Error

mod enhanced_json;
mod validated_json;

pub use self::enhanced_json::Json;
pub use self::validated_json::ValidateJson;
