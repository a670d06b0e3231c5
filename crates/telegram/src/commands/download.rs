//! URL submissions: runs the relay pipeline for one message

use fetch::Fetcher;
use teloxide::prelude::*;

use crate::constants::emoji;
use crate::error::{BotError, UserMessage};
use crate::pipeline::{self, Transport};
use crate::relay::TelegramTransport;
use crate::types::HandlerResult;
use crate::{handlers, utils};

/// Treat the message text as a direct link and relay the file back
pub async fn download(bot: Bot, msg: Message, fetcher: Fetcher) -> HandlerResult {
    let Some(text) = msg.text() else {
        return super::invalid_input(bot, msg).await;
    };
    let url = text.trim();

    // Reject before any status message or network access
    if let Err(err) = fetch::validate_url(url) {
        tracing::info!("Rejected input from chat {}: {}", msg.chat.id, err);
        return handlers::send_text(&bot, msg.chat.id, BotError::from(err).user_message()).await;
    }

    let status = bot
        .send_message(msg.chat.id, format!("{} Analyzing URL...", emoji::SEARCH))
        .await?;
    let transport = TelegramTransport::new(bot.clone(), msg.chat.id, status.id);

    match pipeline::run(&fetcher, url, &transport).await {
        Ok(report) => {
            tracing::info!(
                "Relayed {} to chat {}: {} bytes in {}",
                report.filename,
                msg.chat.id,
                report.stats.bytes,
                utils::format_elapsed(report.stats.elapsed)
            );
            transport.clear_status().await;
        }
        Err(err) => {
            tracing::error!("Relay of {} for chat {} failed: {}", url, msg.chat.id, err);
            transport.status(err.user_message()).await;
        }
    }

    Ok(())
}
