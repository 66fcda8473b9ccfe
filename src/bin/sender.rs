//! # Sender Binary Entry Point
//!
//! Thin wrapper that transmits one three-field message and exits.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin sender -- 127.0.0.1:9000 a b c
//! ```
//!
//! The process exits 0 once the dispatch has been attempted; a failed send
//! is logged, not turned into a non-zero exit. Missing arguments exit 1.

use std::time::Duration;

use clap::Parser;
use env_logger::Builder;
use log::{error, info, LevelFilter};
use std::io::Write;

use hello_wire::{Message, Sender};

/// Command-line arguments for the sender binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Endpoint to send to (e.g., "127.0.0.1:9000")
    endpoint: String,

    /// First message field
    field1: String,

    /// Second message field
    field2: String,

    /// Third message field
    field3: String,

    /// Bound on the whole connect-write-close sequence, in seconds
    #[arg(long, default_value_t = 5)]
    timeout_secs: u64,
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

    let sender = Sender::new(args.endpoint.as_str())
        .with_timeout(Duration::from_secs(args.timeout_secs));
    let message = Message::hello(args.field1, args.field2, args.field3);

    match sender.send(&message).await {
        Ok(()) => info!("✅ Message dispatched to {}", args.endpoint),
        Err(e) => error!("❌ Send failed: {}", e),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_arguments_exit_one_but_help_exits_zero() {
        let missing = Args::try_parse_from(["sender"]).unwrap_err();
        assert_eq!(usage_exit_code(&missing), 1);

        let help = Args::try_parse_from(["sender", "--help"]).unwrap_err();
        assert_eq!(usage_exit_code(&help), 0);
    }
}
