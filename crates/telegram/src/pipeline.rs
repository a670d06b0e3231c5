//! The per-message relay pipeline
//!
//! `open` (validate, probe, size guard, headers) → status update → streaming
//! download with progress → upload with caption. The staged file belongs to
//! the [`Download`] value and is removed when it goes out of scope, so every
//! exit path below cleans up without explicit calls.

use std::future::Future;
use std::time::Duration;

use fetch::{Download, Fetcher, Progress, TransferStats};
use teloxide::RequestError;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::constants::{emoji, UPLOAD_RETRY_DELAY};
use crate::error::BotResult;
use crate::utils;

/// Where status text and the finished file are delivered
pub trait Transport: Send + Sync {
    /// Replace the status text shown to the user; failures are not fatal
    fn status(&self, text: String) -> impl Future<Output = ()> + Send;

    /// Start reporting download progress until the returned task is aborted
    fn watch_progress(&self, filename: String, progress: watch::Receiver<Progress>)
        -> JoinHandle<()>;

    /// Deliver the downloaded file
    fn upload(
        &self,
        download: &Download,
        caption: String,
    ) -> impl Future<Output = Result<(), RequestError>> + Send;
}

/// Outcome of a successful relay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayReport {
    pub filename: String,
    pub stats: TransferStats,
}

/// Download `raw_url` and relay it through `transport`
///
/// # Errors
/// `BotError::Fetch` for validation and download failures,
/// `BotError::UploadFailed` when the transport rejects the file.
pub async fn run<T: Transport>(
    fetcher: &Fetcher,
    raw_url: &str,
    transport: &T,
) -> BotResult<RelayReport> {
    let remote = fetcher.open(raw_url).await?;

    transport
        .status(utils::format_file_info(
            &remote.filename,
            remote.content_length,
            remote.content_type.as_deref(),
        ))
        .await;

    let (tx, rx) = watch::channel(Progress::default());
    let tracker = transport.watch_progress(remote.filename.clone(), rx);
    let result = fetcher.download(remote, &tx).await;
    tracker.abort();
    let download = result?;

    transport
        .status(format!(
            "{} Download complete!\nFile: {}\nSize: {}\n\n{} Uploading to Telegram...",
            emoji::SUCCESS,
            download.filename,
            utils::format_size(download.stats.bytes),
            emoji::UPLOAD
        ))
        .await;

    let caption = utils::build_caption(&download.filename, &download.stats);
    upload_with_retry(transport, &download, caption)
        .await
        .map_err(crate::BotError::UploadFailed)?;

    Ok(RelayReport {
        filename: download.filename.clone(),
        stats: download.stats,
    })
}

async fn upload_with_retry<T: Transport>(
    transport: &T,
    download: &Download,
    caption: String,
) -> Result<(), RequestError> {
    match transport.upload(download, caption.clone()).await {
        Err(err) => match retry_delay(&err) {
            Some(delay) => {
                tracing::warn!(
                    "Upload of {} failed ({}), retrying once in {:?}",
                    download.filename,
                    err,
                    delay
                );
                tokio::time::sleep(delay).await;
                transport.upload(download, caption).await
            }
            None => Err(err),
        },
        ok => ok,
    }
}

/// Network trouble and flood control are worth one more attempt; flood
/// control dictates its own wait
fn retry_delay(err: &RequestError) -> Option<Duration> {
    match err {
        RequestError::RetryAfter(secs) => Some(secs.duration()),
        RequestError::Network(_) | RequestError::Io(_) => Some(UPLOAD_RETRY_DELAY),
        _ => None,
    }
}
