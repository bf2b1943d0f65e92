//! WebSocket message DTOs.
//!
//! Every frame on the wire is a tagged union: the `type` field selects the
//! variant and serde rejects frames with a missing or unknown tag, or with
//! missing required fields, before anything reaches the authorization
//! check.

use serde::{Deserialize, Serialize};

/// Timer state exchanged between creator and participants.
///
/// The server never interprets these fields; they are validated for
/// presence here and forwarded as an opaque payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerStateDto {
    /// Deadline as UTC epoch milliseconds; `null` while the timer is paused
    pub end_time: Option<i64>,
    pub remaining_seconds: i64,
    pub preset_minutes: u32,
    pub is_running: bool,
}

/// Messages a client may send to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    /// Join a room. Must be the first frame of a connection.
    #[serde(rename_all = "camelCase")]
    Join {
        room_id: String,
        session_id: String,
        is_creator: bool,
    },
    /// Push a timer-state change to every other endpoint in the room
    #[serde(rename_all = "camelCase")]
    TimerBroadcast {
        room_id: String,
        timer_state: TimerStateDto,
    },
}

/// Messages the server may send to a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Acknowledges a successful join
    #[serde(rename_all = "camelCase")]
    Joined { room_id: String, joined_at: i64 },
    /// A timer-state change originated by a creator in the same room
    #[serde(rename_all = "camelCase")]
    TimerUpdate { timer_state: TimerStateDto },
    /// Delivery diagnostics returned to the originator of a broadcast
    #[serde(rename_all = "camelCase")]
    BroadcastAck { delivered: usize, pruned: usize },
    /// Request rejected
    #[serde(rename_all = "camelCase")]
    Error { code: ErrorCode, message: String },
}

/// Result codes surfaced to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCode {
    /// Malformed frame or missing required field
    BadRequest,
    /// Non-creator attempted a broadcast
    Forbidden,
    /// Store or transport setup failure
    Internal,
}
