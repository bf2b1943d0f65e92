//! HTTP API response DTOs.

use serde::Serialize;

/// One connection within a room listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDto {
    pub endpoint_id: String,
    pub session_id: String,
    pub is_creator: bool,
    /// Join time in RFC 3339
    pub joined_at: String,
}

/// Response of `GET /api/rooms/{room_id}/connections`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomConnectionsDto {
    pub room_id: String,
    pub connections: Vec<ConnectionDto>,
}
