use std::fmt;

use fetch::FetchError;

use crate::constants::{emoji, MAX_ERROR_DETAIL};
use crate::utils::{format_size, truncate};

/// Custom error type for telegram bot operations
#[derive(Debug)]
pub enum BotError {
    /// Validation or download failure
    Fetch(FetchError),
    /// Telegram rejected the relayed file
    UploadFailed(teloxide::RequestError),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::Fetch(e) => write!(f, "{}", e),
            BotError::UploadFailed(e) => write!(f, "Upload failed: {}", e),
        }
    }
}

impl std::error::Error for BotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BotError::Fetch(e) => Some(e),
            BotError::UploadFailed(e) => Some(e),
        }
    }
}

impl From<FetchError> for BotError {
    fn from(err: FetchError) -> Self {
        BotError::Fetch(err)
    }
}

/// Result type alias for bot operations
pub type BotResult<T> = Result<T, BotError>;

/// Helper trait to convert results into user-friendly messages
pub trait UserMessage {
    fn user_message(&self) -> String;
}

impl UserMessage for FetchError {
    fn user_message(&self) -> String {
        match self {
            FetchError::InvalidUrl(_) => format!(
                "{} Invalid URL\nPlease send a valid HTTP/HTTPS link starting with http:// or https://",
                emoji::ERROR
            ),
            FetchError::TooLarge { size, limit } => format!(
                "{} File too large\nSize: {}\nLimit: {}\n\nPlease use a smaller file.",
                emoji::ERROR,
                format_size(*size),
                format_size(*limit)
            ),
            FetchError::UnsupportedType(name) => format!(
                "{} Unsupported file type\nFile: {}\n\nI support common file types only.",
                emoji::WARNING,
                name
            ),
            FetchError::EmptyFile => {
                format!("{} Empty File\nDownloaded file is empty.", emoji::ERROR)
            }
            FetchError::DownloadFailed(reason) => format!(
                "{} Download failed\n{}\n\nPlease try again or use a different link.",
                emoji::ERROR,
                truncate(reason, MAX_ERROR_DETAIL)
            ),
            FetchError::Io(_) => format!(
                "{} Could not store the file temporarily. Please try again later.",
                emoji::ERROR
            ),
        }
    }
}

impl UserMessage for BotError {
    fn user_message(&self) -> String {
        match self {
            BotError::Fetch(e) => e.user_message(),
            BotError::UploadFailed(e) => format!(
                "{} Upload failed\nError: {}\n\nFile might be too large or format not supported.",
                emoji::ERROR,
                truncate(&e.to_string(), MAX_ERROR_DETAIL)
            ),
        }
    }
}
