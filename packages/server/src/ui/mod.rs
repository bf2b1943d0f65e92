//! UI 層
//!
//! axum による WebSocket / HTTP エンドポイントの提供。

pub mod handler;
pub mod server;
pub mod signal;
pub mod state;

pub use server::Server;
