//! Progress reporting through edits of the status message

use fetch::Progress;
use teloxide::prelude::*;
use teloxide::types::MessageId;
use tokio::sync::watch;

use crate::constants::PROGRESS_INTERVAL;
use crate::utils;

/// Edit the status message with the latest progress, at most once per interval
///
/// Returns when the sending side of `progress` is dropped; callers usually
/// abort the task as soon as the download finishes.
pub async fn track(
    bot: Bot,
    chat_id: ChatId,
    message_id: MessageId,
    filename: String,
    mut progress: watch::Receiver<Progress>,
) {
    let mut ticker = tokio::time::interval(PROGRESS_INTERVAL);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first tick completes immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;

        match progress.has_changed() {
            Ok(true) => {}
            Ok(false) => continue,
            Err(_) => break,
        }

        let current = *progress.borrow_and_update();
        let text = utils::format_progress(&filename, &current);
        if let Err(e) = bot.edit_message_text(chat_id, message_id, text).await {
            tracing::debug!("Progress update for {} failed: {}", filename, e);
        }
    }
}
