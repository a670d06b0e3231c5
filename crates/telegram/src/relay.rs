//! Relay Uploader: sends staged files back to the originating chat

use fetch::{Download, Progress};
use teloxide::prelude::*;
use teloxide::types::{InputFile, MessageId};
use teloxide::RequestError;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::constants::MAX_PHOTO_SIZE;
use crate::pipeline::Transport;
use crate::progress;

/// How a file is presented in the chat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Photo,
    Audio,
    Document,
}

/// Pick the send method from the filename's MIME type
///
/// Photos are recompressed by Telegram and capped at 10 MiB, so large or
/// unusual images are sent as documents instead.
pub fn media_kind(filename: &str, size: u64) -> MediaKind {
    let Some(mime) = mime_guess::from_path(filename).first() else {
        return MediaKind::Document;
    };

    match (mime.type_().as_str(), mime.subtype().as_str()) {
        ("video", _) => MediaKind::Video,
        ("audio", _) => MediaKind::Audio,
        ("image", "jpeg" | "png" | "webp") if size <= MAX_PHOTO_SIZE => MediaKind::Photo,
        _ => MediaKind::Document,
    }
}

/// Send `download` to `chat_id` using the method matching its media kind
pub async fn send_file(
    bot: &Bot,
    chat_id: ChatId,
    download: &Download,
    caption: String,
) -> Result<(), RequestError> {
    let kind = media_kind(&download.filename, download.stats.bytes);
    let input = InputFile::file(download.path().to_path_buf()).file_name(download.filename.clone());

    tracing::info!(
        "Uploading {} ({} bytes) to chat {} as {:?}",
        download.filename,
        download.stats.bytes,
        chat_id,
        kind
    );

    match kind {
        MediaKind::Video => {
            bot.send_video(chat_id, input)
                .caption(caption)
                .supports_streaming(true)
                .await?;
        }
        MediaKind::Photo => {
            bot.send_photo(chat_id, input).caption(caption).await?;
        }
        MediaKind::Audio => {
            bot.send_audio(chat_id, input).caption(caption).await?;
        }
        MediaKind::Document => {
            bot.send_document(chat_id, input).caption(caption).await?;
        }
    }

    Ok(())
}

/// Telegram-backed [`Transport`] bound to one chat and its status message
#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
    chat_id: ChatId,
    status_id: MessageId,
}

impl TelegramTransport {
    pub fn new(bot: Bot, chat_id: ChatId, status_id: MessageId) -> Self {
        Self {
            bot,
            chat_id,
            status_id,
        }
    }

    /// Remove the status message once the file has been delivered
    pub async fn clear_status(&self) {
        if let Err(e) = self.bot.delete_message(self.chat_id, self.status_id).await {
            tracing::warn!("Failed to delete status message in chat {}: {}", self.chat_id, e);
        }
    }
}

impl Transport for TelegramTransport {
    async fn status(&self, text: String) {
        if let Err(e) = self
            .bot
            .edit_message_text(self.chat_id, self.status_id, text)
            .await
        {
            tracing::warn!("Failed to update status message in chat {}: {}", self.chat_id, e);
        }
    }

    fn watch_progress(
        &self,
        filename: String,
        progress: watch::Receiver<Progress>,
    ) -> JoinHandle<()> {
        tokio::spawn(progress::track(
            self.bot.clone(),
            self.chat_id,
            self.status_id,
            filename,
            progress,
        ))
    }

    async fn upload(&self, download: &Download, caption: String) -> Result<(), RequestError> {
        send_file(&self.bot, self.chat_id, download, caption).await
    }
}
