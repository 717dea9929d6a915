//! The hit counter contract.
//!
//! The counter itself lives in the external store under [`HITS_KEY`]; this
//! module only knows its name and how a reading is presented to clients.

/// Store key holding the hit count.
pub const HITS_KEY: &str = "hits";

/// Body returned for a successful hit.
pub fn render_greeting(count: i64) -> String {
    format!("Hello from Redis! I have been seen {count} times.")
}
