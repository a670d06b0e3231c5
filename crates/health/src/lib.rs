//! HTTP liveness endpoint
//!
//! Hosting platforms that expect a web service keep the bot alive by polling
//! this server; it carries no state of its own.

mod server;

pub use server::{HealthServer, ALIVE_TEXT};

/// Result type alias for health server operations
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;
