//! Command handlers for the Telegram bot
//!
//! - `basic`: start, help, status and the fallback reply
//! - `download`: free-text URL submissions

mod basic;
mod download;

pub use basic::*;
pub use download::*;
