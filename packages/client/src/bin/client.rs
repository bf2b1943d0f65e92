//! CLI client for the sunadokei timer sync server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sunadokei-client -- --room-id abc123 --session-id alice
//! cargo run --bin sunadokei-client -- --room-id abc123 --session-id owner --creator
//! ```

use clap::Parser;
use sunadokei_client::session::run_client_session;
use sunadokei_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "CLI client for the sunadokei timer sync server", long_about = None)]
struct Args {
    /// WebSocket URL of the timer sync server
    #[arg(short, long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,

    /// Room (league session) to join
    #[arg(short, long)]
    room_id: String,

    /// Session identifier shown to the server
    #[arg(short, long)]
    session_id: String,

    /// Join with creator privilege (allowed to drive the timer)
    #[arg(short, long, default_value_t = false)]
    creator: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    let args = Args::parse();

    if let Err(e) = run_client_session(&args.url, &args.room_id, &args.session_id, args.creator)
        .await
    {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
