//! # Sender - One-Shot Message Transmission
//!
//! The sender opens one connection, writes one framed message, and closes.
//! There is no retry logic: a failure is returned to the caller, who decides
//! what to do with it.

use std::time::Duration;

use log::debug;
use tokio::net::TcpStream;

use crate::common::connection::Connection;
use crate::common::error::Error;
use crate::common::messages::Message;

/// Default bound on the whole connect-write-close sequence.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// One-shot message sender for a fixed endpoint.
///
/// # Example
/// ```ignore
/// let sender = Sender::new("127.0.0.1:9000").with_timeout(Duration::from_secs(2));
/// sender.send(&Message::hello("a", "b", "c")).await?;
/// ```
pub struct Sender {
    endpoint: String,
    timeout: Duration,
}

impl Sender {
    /// Create a sender targeting the given endpoint, with the default timeout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: DEFAULT_SEND_TIMEOUT,
        }
    }

    /// Override the bound on the connect-write-close sequence.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Transmit one message: connect, write one frame, flush, close.
    ///
    /// # Errors
    /// - [`Error::Connection`]: the endpoint is unreachable
    /// - [`Error::Timeout`]: the sequence exceeded the configured deadline
    /// - [`Error::Write`]: the transport closed mid-write
    pub async fn send(&self, message: &Message) -> Result<(), Error> {
        let attempt = async {
            let stream = TcpStream::connect(&self.endpoint).await.map_err(|e| {
                Error::Connection {
                    endpoint: self.endpoint.clone(),
                    source: e,
                }
            })?;
            debug!("🔗 Connected to {}", self.endpoint);

            let mut conn = Connection::new(stream);
            conn.write_message(message).await?;
            conn.shutdown().await?;

            debug!("✅ Sent 1 message to {}", self.endpoint);
            Ok(())
        };

        match tokio::time::timeout(self.timeout, attempt).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout {
                endpoint: self.endpoint.clone(),
                timeout: self.timeout,
            }),
        }
    }
}

/// Send one three-field message to `endpoint` and return.
///
/// Convenience over [`Sender`] with the default timeout.
pub async fn send(
    endpoint: &str,
    field1: impl Into<String>,
    field2: impl Into<String>,
    field3: impl Into<String>,
) -> Result<(), Error> {
    Sender::new(endpoint)
        .send(&Message::hello(field1, field2, field3))
        .await
}
