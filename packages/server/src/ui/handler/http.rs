//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::RoomId,
    infrastructure::dto::http::{ConnectionDto, RoomConnectionsDto},
    ui::state::AppState,
    usecase::ListRoomError,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get the connections currently joined to a room
pub async fn get_room_connections(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomConnectionsDto>, StatusCode> {
    let room_id = match RoomId::try_from(room_id) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Invalid room id in connection listing: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    match state.list_room_usecase.execute(&room_id).await {
        Ok(records) => {
            // Domain Model から DTO への変換
            let connections: Vec<ConnectionDto> = records.into_iter().map(Into::into).collect();
            Ok(Json(RoomConnectionsDto {
                room_id: room_id.into_string(),
                connections,
            }))
        }
        Err(ListRoomError::Storage(e)) => {
            tracing::error!("Failed to list room connections: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
