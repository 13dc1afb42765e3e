//! Kinnren anonymous family chat relay server.
//!
//! Receives chat messages over WebSocket and broadcasts them to every client
//! of the same family, the sender included.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kinnren-server
//! cargo run --bin kinnren-server -- --host 0.0.0.0 --port 3000
//! ```

use clap::Parser;
use kinnren_server::{RelayConfig, build_server};
use kinnren_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "kinnren-server")]
#[command(about = "Anonymous family chat relay (WebSocket broadcast)", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Outbound frames buffered per connection before a slow client is dropped
    #[arg(long, default_value_t = RelayConfig::DEFAULT_SEND_QUEUE_CAPACITY)]
    send_queue_capacity: usize,

    /// Messages kept per family for the history endpoint
    #[arg(long, default_value_t = RelayConfig::DEFAULT_HISTORY_CAPACITY)]
    history_capacity: usize,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), env!("CARGO_BIN_NAME"), &args.log_level);

    let config = RelayConfig {
        send_queue_capacity: args.send_queue_capacity,
        history_capacity: args.history_capacity,
    };
    tracing::debug!("Relay configuration: {:?}", config);

    let server = build_server(&config);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
