pub mod sender;

pub use sender::{send, Sender, DEFAULT_SEND_TIMEOUT};
