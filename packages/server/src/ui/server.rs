//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::usecase::{
    BroadcastTimerUseCase, DisconnectEndpointUseCase, JoinRoomUseCase, ListRoomConnectionsUseCase,
};

use super::{
    handler::{get_room_connections, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Build the application router.
///
/// Factored out of [`Server::run`] so integration tests can serve the same
/// router on an ephemeral listener.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // WebSocket エンドポイント
        .route("/ws", get(websocket_handler))
        // HTTP エンドポイント
        .route("/api/health", get(health_check))
        .route("/api/rooms/{room_id}/connections", get(get_room_connections))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// WebSocket timer sync server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     join_room_usecase,
///     broadcast_timer_usecase,
///     disconnect_endpoint_usecase,
///     list_room_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// JoinRoomUseCase（Room 参加のユースケース）
    join_room_usecase: Arc<JoinRoomUseCase>,
    /// BroadcastTimerUseCase（タイマー更新ブロードキャストのユースケース）
    broadcast_timer_usecase: Arc<BroadcastTimerUseCase>,
    /// DisconnectEndpointUseCase（切断のユースケース）
    disconnect_endpoint_usecase: Arc<DisconnectEndpointUseCase>,
    /// ListRoomConnectionsUseCase（Room 接続一覧取得のユースケース）
    list_room_usecase: Arc<ListRoomConnectionsUseCase>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `join_room_usecase` - UseCase for joining a room
    /// * `broadcast_timer_usecase` - UseCase for broadcasting timer updates
    /// * `disconnect_endpoint_usecase` - UseCase for endpoint disconnection
    /// * `list_room_usecase` - UseCase for listing room connections
    pub fn new(
        join_room_usecase: Arc<JoinRoomUseCase>,
        broadcast_timer_usecase: Arc<BroadcastTimerUseCase>,
        disconnect_endpoint_usecase: Arc<DisconnectEndpointUseCase>,
        list_room_usecase: Arc<ListRoomConnectionsUseCase>,
    ) -> Self {
        Self {
            join_room_usecase,
            broadcast_timer_usecase,
            disconnect_endpoint_usecase,
            list_room_usecase,
        }
    }

    /// Run the timer sync server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            join_room_usecase: self.join_room_usecase,
            broadcast_timer_usecase: self.broadcast_timer_usecase,
            disconnect_endpoint_usecase: self.disconnect_endpoint_usecase,
            list_room_usecase: self.list_room_usecase,
        });

        let app = router(app_state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Timer sync server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
