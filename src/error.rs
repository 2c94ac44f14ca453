//! Unified error type.

use std::net::SocketAddr;

use thiserror::Error;

use crate::method::Method;

/// The error type returned by strata's fallible operations.
///
/// Application-level outcomes (404, 405, 401, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. Building a
/// middleware chain cannot fail either. This type surfaces startup and
/// infrastructure failures only.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("io: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid route `{method} {pattern}`: {source}")]
    Route {
        method: Method,
        pattern: String,
        #[source]
        source: matchit::InsertError,
    },

    #[error("invalid configuration value for {key}: {reason}")]
    Config { key: &'static str, reason: String },

    #[error("failed to install tracing subscriber: {reason}")]
    Telemetry { reason: String },
}

impl Error {
    pub(crate) fn config(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Config { key, reason: reason.into() }
    }
}
