//! Client error types.

use thiserror::Error;

/// Errors surfaced by the CLI client
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Failed to connect or the connection was lost
    #[error("connection error: {0}")]
    ConnectionError(String),

    /// The server rejected a request
    #[error("rejected by server: {0}")]
    Rejected(String),

    /// A timer command could not be parsed
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// pause/resume issued before any timer was started
    #[error("no active timer; use 'start <minutes>' first")]
    NoActiveTimer,
}
