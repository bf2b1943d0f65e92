//! Timer sync server library.
//!
//! Tracks which endpoints are connected to which league session (room),
//! authorizes the session creator to push timer-state changes, and fans
//! each change out to every other endpoint in the room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
