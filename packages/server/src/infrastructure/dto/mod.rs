//! Data Transfer Objects (DTOs) for the timer sync application.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket message DTOs (tagged unions)
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
