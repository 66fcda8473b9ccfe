//! # TCP Connection Abstraction
//!
//! Wraps a TCP stream with message framing. Both sender and server use this
//! type, so the protocol is symmetric by construction.
//!
//! ## Wire Protocol
//!
//! Messages are sent with a 4-byte length prefix (big-endian) followed by
//! JSON data:
//! ```text
//! [4 bytes: message length] [N bytes: JSON message data]
//! ```
//!
//! The length-prefixed framing gives:
//! - Well-defined message boundaries over a TCP byte stream
//! - Variable-length messages
//! - Protection against incomplete reads (a truncated frame is an error,
//!   not a short message)

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use super::error::{Error, FramingError};
use super::messages::Message;

/// Default cap on a single frame's body, to prevent a peer from forcing a
/// huge allocation with a bogus length prefix.
pub const DEFAULT_MAX_FRAME_BYTES: usize = 1024 * 1024;

/// TCP connection wrapper with message framing support.
pub struct Connection {
    stream: TcpStream,
    max_frame_bytes: usize,
}

impl Connection {
    /// Wrap an established TCP stream with the default frame size limit.
    pub fn new(stream: TcpStream) -> Self {
        Self::with_frame_limit(stream, DEFAULT_MAX_FRAME_BYTES)
    }

    /// Wrap an established TCP stream with an explicit frame size limit.
    pub fn with_frame_limit(stream: TcpStream, max_frame_bytes: usize) -> Self {
        Self {
            stream,
            max_frame_bytes,
        }
    }

    /// Read one complete message from the connection.
    ///
    /// # Returns
    /// - `Ok(Some(Message))`: a complete frame was read and decoded
    /// - `Ok(None)`: the peer closed cleanly on a frame boundary
    /// - `Err(FramingError)`: oversized frame, disconnect mid-frame, or a
    ///   body that does not decode; the connection is no longer usable
    pub async fn read_message(&mut self) -> Result<Option<Message>, FramingError> {
        let mut length_buf = [0u8; 4];
        let mut filled = 0;

        // EOF before any prefix byte is a clean close. EOF once the frame
        // has started, even partway through the prefix, is a truncated frame.
        while filled < length_buf.len() {
            match self.stream.read(&mut length_buf[filled..]).await {
                Ok(0) if filled == 0 => return Ok(None),
                Ok(0) => {
                    return Err(FramingError::Truncated(std::io::Error::new(
                        std::io::ErrorKind::UnexpectedEof,
                        "peer closed inside the length prefix",
                    )))
                }
                Ok(n) => filled += n,
                Err(e) => return Err(FramingError::Truncated(e)),
            }
        }

        let length = u32::from_be_bytes(length_buf) as usize;
        if length > self.max_frame_bytes {
            return Err(FramingError::Oversized {
                length,
                limit: self.max_frame_bytes,
            });
        }

        let mut data = vec![0u8; length];
        self.stream
            .read_exact(&mut data)
            .await
            .map_err(FramingError::Truncated)?;

        let message = Message::from_bytes(&data)?;
        Ok(Some(message))
    }

    /// Write one framed message to the connection.
    ///
    /// Serializes the message to JSON, writes the 4-byte length prefix and
    /// the body, then flushes so the frame is actually on the wire before
    /// returning.
    pub async fn write_message(&mut self, message: &Message) -> Result<(), Error> {
        let data = message.to_bytes().map_err(FramingError::Malformed)?;
        let length = frame_length(data.len())?;

        self.stream
            .write_all(&length.to_be_bytes())
            .await
            .map_err(Error::Write)?;
        self.stream.write_all(&data).await.map_err(Error::Write)?;
        self.stream.flush().await.map_err(Error::Write)?;

        Ok(())
    }

    /// Shut down the write half, signalling end-of-stream to the peer.
    pub async fn shutdown(&mut self) -> Result<(), Error> {
        self.stream.shutdown().await.map_err(Error::Write)
    }
}

/// A frame body must be addressable by the 4-byte prefix.
fn frame_length(len: usize) -> Result<u32, FramingError> {
    u32::try_from(len).map_err(|_| FramingError::Oversized {
        length: len,
        limit: u32::MAX as usize,
    })
}
