//! # Common Components
//!
//! Shared building blocks used by both sender and server:
//!
//! - [`messages`]: the `Message` data model and its JSON encoding
//! - [`connection`]: length-prefixed framing over a TCP stream
//! - [`error`]: the error taxonomy surfaced by the library
//! - [`config`]: TOML configuration loading

pub mod config;
pub mod connection;
pub mod error;
pub mod messages;

pub use connection::Connection;
pub use error::{Error, FramingError};
pub use messages::Message;
