//! # Server Binary Entry Point
//!
//! Thin wrapper that runs a hello-wire server with a handler that prints
//! every received payload.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin server -- 127.0.0.1:9000 config/server.toml
//! ```
//!
//! The server will:
//! 1. Load configuration from the specified TOML file
//! 2. Bind the endpoint given on the command line
//! 3. Accept connections and print each received message
//! 4. Run until Ctrl-C

use clap::Parser;
use env_logger::Builder;
use log::{info, LevelFilter};
use std::io::Write;

use hello_wire::server::{Server, ServerConfig};
use hello_wire::Message;

/// Command-line arguments for the server binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Endpoint to listen on (e.g., "127.0.0.1:9000")
    endpoint: String,

    /// Path to the server configuration file (TOML format)
    config: String,
}

/// Initialize the logging system with timestamp, level, and message formatting.
///
/// Logs are printed to stdout with INFO level by default.
/// Format: `[HH:MM:SS] [LEVEL] message`
fn init_logger() {
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter_level(LevelFilter::Info)
        .init();
}

/// Usage errors exit 1; help and version requests are not usage errors.
fn usage_exit_code(error: &clap::Error) -> i32 {
    use clap::error::ErrorKind;
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger();

    // Usage errors exit with code 1, before any I/O.
    let args = Args::try_parse().unwrap_or_else(|e| {
        let _ = e.print();
        std::process::exit(usage_exit_code(&e));
    });

    let config = ServerConfig::from_file(&args.config)?;

    let server = Server::bind(&args.endpoint, config).await?;
    info!("🚀 Server starting on {}", server.local_addr());

    // Ctrl-C triggers the shutdown signal; in-flight connections close
    // after their current read completes.
    let shutdown = server.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("🛑 Ctrl-C received, shutting down");
            shutdown.shutdown();
        }
    });

    server
        .run(|message: Message| {
            info!("📨 Received data: {:?}", message.fields());
        })
        .await?;

    Ok(())
}
