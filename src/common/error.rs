//! # Error Taxonomy
//!
//! Typed errors surfaced by the library. Each variant maps to one failure
//! domain:
//!
//! - [`Error::Connection`] / [`Error::Timeout`]: sender-side transport setup
//! - [`Error::Bind`]: server-side endpoint claim
//! - [`Error::Write`]: transport closed mid-write
//! - [`Error::Framing`]: a malformed frame; drops only the affected
//!   connection, never the server
//!
//! No variant triggers an automatic retry; all failures are returned
//! synchronously to the immediate caller.

use std::time::Duration;

use thiserror::Error;

/// Top-level error type for sender and server operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The sender could not reach the endpoint.
    #[error("failed to connect to {endpoint}: {source}")]
    Connection {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    /// The sender's connect-write-close sequence exceeded its deadline.
    #[error("send to {endpoint} timed out after {timeout:?}")]
    Timeout { endpoint: String, timeout: Duration },

    /// The server could not claim its endpoint.
    #[error("failed to bind {endpoint}: {source}")]
    Bind {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    /// The transport closed while a frame was being written.
    #[error("transport closed mid-write: {0}")]
    Write(#[source] std::io::Error),

    /// A connection delivered a frame that cannot be decoded.
    #[error(transparent)]
    Framing(#[from] FramingError),
}

/// A malformed frame on one connection.
///
/// Framing errors are scoped to the connection they occur on; the server
/// drops that connection and keeps serving the rest.
#[derive(Debug, Error)]
pub enum FramingError {
    /// The length prefix claims more bytes than the configured limit allows.
    #[error("frame of {length} bytes exceeds the {limit} byte limit")]
    Oversized { length: usize, limit: usize },

    /// The peer closed the connection after a frame had started.
    #[error("peer closed the connection mid-frame: {0}")]
    Truncated(#[source] std::io::Error),

    /// The frame body is not a valid message.
    #[error("frame body is not a valid message: {0}")]
    Malformed(#[from] serde_json::Error),
}
