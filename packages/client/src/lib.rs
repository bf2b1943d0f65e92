//! CLI client library for the sunadokei timer sync server.
//!
//! Joins a league session room, renders incoming timer updates, and (in
//! creator mode) drives the timer from a readline loop.

pub mod domain;
pub mod error;
pub mod formatter;
pub mod session;
pub mod ui;
