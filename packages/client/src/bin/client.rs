//! Command-line client for the Kinnren relay.
//!
//! Joins a family's anonymous chat, sends each line typed at the prompt and
//! prints every message relayed to the family, including the client's own.
//! Reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kinnren-client
//! cargo run --bin kinnren-client -- --family-id tanaka
//! ```

use clap::Parser;

use kinnren_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "kinnren-client")]
#[command(about = "Anonymous family chat client", long_about = None)]
struct Args {
    /// Family to join
    #[arg(short = 'f', long, default_value = "default")]
    family_id: String,

    /// WebSocket relay URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), &args.log_level);

    if let Err(e) = kinnren_client::run_client(args.url, args.family_id).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
