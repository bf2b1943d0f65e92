//! WebSocket timer sync server for league sessions.
//!
//! Tracks room membership and fans timer-state changes from a room's
//! creator out to every other connected endpoint.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sunadokei-server
//! cargo run --bin sunadokei-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use sunadokei_server::{
    infrastructure::{pusher::WebSocketUpdatePusher, registry::InMemoryConnectionRegistry},
    ui::Server,
    usecase::{
        BroadcastTimerUseCase, DisconnectEndpointUseCase, JoinRoomUseCase,
        ListRoomConnectionsUseCase,
    },
};
use sunadokei_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "WebSocket timer sync server for league sessions", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Registry
    // 2. UpdatePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Registry (in-memory store)
    let registry = Arc::new(InMemoryConnectionRegistry::new());

    // 2. Create UpdatePusher (WebSocket implementation)
    let pusher = Arc::new(WebSocketUpdatePusher::new());

    // 3. Create UseCases
    let clock = Arc::new(SystemClock);
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        registry.clone(),
        pusher.clone(),
        clock,
    ));
    let broadcast_timer_usecase = Arc::new(BroadcastTimerUseCase::new(
        registry.clone(),
        pusher.clone(),
    ));
    let disconnect_endpoint_usecase = Arc::new(DisconnectEndpointUseCase::new(
        registry.clone(),
        pusher.clone(),
    ));
    let list_room_usecase = Arc::new(ListRoomConnectionsUseCase::new(registry.clone()));

    // 4. Create and run the server
    let server = Server::new(
        join_room_usecase,
        broadcast_timer_usecase,
        disconnect_endpoint_usecase,
        list_room_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
