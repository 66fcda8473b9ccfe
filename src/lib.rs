//! # hello-wire
//!
//! A tiny point-to-point messaging primitive over TCP.
//!
//! Two roles share one wire protocol:
//! - [`Sender`]: formats string fields into a message, transmits it once to a
//!   known endpoint, and returns.
//! - [`Server`]: listens on an endpoint, accepts connections concurrently,
//!   and invokes a registered [`Handler`] once per complete message received.
//!
//! Messages are framed with a 4-byte length prefix followed by JSON data; see
//! [`common::connection`] for the wire protocol details.

pub mod common;
pub mod sender;
pub mod server;

pub use common::error::{Error, FramingError};
pub use common::messages::Message;
pub use sender::{send, Sender};
pub use server::{run, Handler, Server, ShutdownHandle};
