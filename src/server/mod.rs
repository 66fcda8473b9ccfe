pub mod config;
pub mod metrics;
pub mod server;

pub use config::ServerConfig;
pub use metrics::ServerMetrics;
pub use server::{run, Handler, Server, ShutdownHandle};
