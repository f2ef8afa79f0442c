//! Errors that stop the server.

use std::{io::Error as IoError, net::SocketAddr};
use thiserror::Error;

/// Errors that may occur while starting or running the server.
#[derive(Debug, Error)]
pub(crate) enum ServerError {
    /// The listening socket could not be bound, e.g. because the port is taken.
    #[error("Unable to bind {addr}: {source}")]
    Bind {
        /// The address that was requested.
        addr: SocketAddr,
        /// The source error.
        #[source]
        source: IoError,
    },
    /// The server stopped accepting connections.
    #[error("Server on {addr} stopped: {source}")]
    Serve {
        /// The address the server listened on.
        addr: SocketAddr,
        /// The source error.
        #[source]
        source: IoError,
    },
}
