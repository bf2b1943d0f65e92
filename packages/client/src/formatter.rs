//! Timer display formatting for the CLI client.

use sunadokei_server::infrastructure::dto::websocket::{ErrorCode, TimerStateDto};
use sunadokei_shared::time::epoch_millis_to_rfc3339;

/// Timer formatter for client display
pub struct TimerFormatter;

impl TimerFormatter {
    /// Format the join acknowledgement
    pub fn format_joined(room_id: &str, joined_at: i64) -> String {
        let timestamp_str = epoch_millis_to_rfc3339(joined_at);
        format!("\nJoined room '{}' at {}\n", room_id, timestamp_str)
    }

    /// Format an incoming timer update
    ///
    /// # Arguments
    ///
    /// * `timer_state` - The timer state received from the room's creator
    ///
    /// # Returns
    ///
    /// A formatted line such as `⏱ 04:32 remaining (running, preset 5 min)`
    pub fn format_timer_update(timer_state: &TimerStateDto) -> String {
        let countdown = Self::format_countdown(timer_state.remaining_seconds);
        let status = if timer_state.is_running {
            "running"
        } else {
            "paused"
        };
        format!(
            "\n⏱ {} remaining ({}, preset {} min)\n",
            countdown, status, timer_state.preset_minutes
        )
    }

    /// Format seconds as mm:ss (hours spill into the minute field)
    pub fn format_countdown(seconds: i64) -> String {
        let seconds = seconds.max(0);
        format!("{:02}:{:02}", seconds / 60, seconds % 60)
    }

    /// Format the delivery diagnostics returned after a broadcast
    pub fn format_broadcast_ack(delivered: usize, pruned: usize) -> String {
        if pruned == 0 {
            format!("sent to {} participant(s)\n", delivered)
        } else {
            format!(
                "sent to {} participant(s), {} stale connection(s) dropped\n",
                delivered, pruned
            )
        }
    }

    /// Format an error frame from the server
    pub fn format_server_error(code: ErrorCode, message: &str) -> String {
        let label = match code {
            ErrorCode::BadRequest => "bad request",
            ErrorCode::Forbidden => "forbidden",
            ErrorCode::Internal => "server error",
        };
        format!("\n! {}: {}\n", label, message)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
