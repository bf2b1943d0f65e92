//! Shared library for the sunadokei timer sync application.
//!
//! Utilities used by both the server and the client binaries:
//! logging setup and time helpers.

pub mod logger;
pub mod time;
