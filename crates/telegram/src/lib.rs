pub mod commands;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod pipeline;
pub mod progress;
pub mod relay;
pub mod telegram;
pub mod types;
pub mod utils;

pub use error::{BotError, BotResult, UserMessage};
pub use pipeline::{RelayReport, Transport};
pub use relay::TelegramTransport;
pub use teloxide::prelude::Dispatcher;
pub use types::{Command, HandlerResult};
