//! Terminal UI helpers for the CLI client.

use std::io::Write;

/// Redraw the readline prompt after asynchronous output interrupted it.
pub fn redisplay_prompt(session_id: &str) {
    print!("{}> ", session_id);
    let _ = std::io::stdout().flush();
}
