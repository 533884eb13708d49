//! [`Error`], [`ErrorKind`] and [`Result`].

mod auth_error;
mod http_error;
mod service_error;
mod store_error;

pub use http_error::{Error, ErrorKind, Result};
