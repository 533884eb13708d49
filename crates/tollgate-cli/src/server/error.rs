use std::io;
use std::net::SocketAddr;

use thiserror::Error;

pub type Result<T, E = ServerError> = std::result::Result<T, E>;

/// Failure to start or keep running the listener.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("cannot listen on {address}: {source}")]
    BindError {
        address: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("server stopped unexpectedly: {0}")]
    Runtime(#[source] io::Error),
}

impl ServerError {
    pub fn bind_error(address: SocketAddr, source: io::Error) -> Self {
        Self::BindError { address, source }
    }

    /// Short stable code for log aggregation.
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::BindError { .. } => "bind",
            Self::Runtime(_) => "runtime",
        }
    }

    /// Operator hint derived from the underlying I/O error.
    pub fn suggestion(&self) -> Option<&'static str> {
        let source = match self {
            Self::BindError { source, .. } | Self::Runtime(source) => source,
        };

        Some(match source.kind() {
            io::ErrorKind::AddrInUse => "another process owns this port, stop it or set PORT",
            io::ErrorKind::PermissionDenied => "binding was refused, use a port of 1024 or above",
            io::ErrorKind::AddrNotAvailable => "HOST is not assigned to any local interface",
            _ => return None,
        })
    }
}
