//! Small helpers shared by the command handlers

use teloxide::prelude::*;

use crate::types::HandlerResult;

/// Send plain text to `chat_id`
pub async fn send_text(bot: &Bot, chat_id: ChatId, text: impl Into<String>) -> HandlerResult {
    bot.send_message(chat_id, text).await?;
    Ok(())
}
