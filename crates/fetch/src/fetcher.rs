//! HTTP side of the pipeline: size probe and streaming download

use std::path::Path;
use std::pin::pin;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::{Stream, StreamExt};
use reqwest::header::{HeaderMap, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Response, Url};
use tokio::io::AsyncWriteExt;
use tokio::sync::watch;

use crate::constants::{
    CONNECT_TIMEOUT, MAX_FILE_SIZE, MAX_REDIRECTS, PROBE_TIMEOUT, READ_TIMEOUT, USER_AGENT,
};
use crate::error::{FetchError, FetchResult};
use crate::filename::{is_extension_allowed, resolve_filename};
use crate::staging::{StagedFile, StagingArea};
use crate::stats::{Progress, TransferStats};
use crate::url::validate_url;

/// Download tunables
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Upload ceiling enforced at probe time and while streaming
    pub max_file_size: u64,
    pub probe_timeout: Duration,
    pub connect_timeout: Duration,
    /// Applies to the response headers and to every gap between body chunks
    pub read_timeout: Duration,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            probe_timeout: PROBE_TIMEOUT,
            connect_timeout: CONNECT_TIMEOUT,
            read_timeout: READ_TIMEOUT,
            max_redirects: MAX_REDIRECTS,
        }
    }
}

/// What a header-only request revealed about a resource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeInfo {
    pub content_length: Option<u64>,
    pub content_type: Option<String>,
}

/// A resource whose response headers passed every check; the body is not read yet
#[derive(Debug)]
pub struct RemoteFile {
    pub url: Url,
    pub filename: String,
    pub content_type: Option<String>,
    /// Declared length, from the download response or the probe
    pub content_length: Option<u64>,
    response: Response,
    started: Instant,
}

/// A fully downloaded file waiting in staging
///
/// Dropping it deletes the staged copy.
#[derive(Debug)]
pub struct Download {
    pub filename: String,
    pub content_type: Option<String>,
    pub stats: TransferStats,
    file: StagedFile,
}

impl Download {
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Shared HTTP client plus staging area
///
/// Built once at startup and cloned into every handler; nothing in it is
/// mutated per request.
#[derive(Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    staging: Arc<StagingArea>,
    config: FetchConfig,
}

impl Fetcher {
    /// Create a fetcher with its own HTTP client
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: FetchConfig, staging: StagingArea) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(config.connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self {
            client,
            staging: Arc::new(staging),
            config,
        })
    }

    pub fn max_file_size(&self) -> u64 {
        self.config.max_file_size
    }

    pub fn staging_dir(&self) -> &Path {
        self.staging.path()
    }

    /// Reject a declared length above the ceiling; unknown lengths pass
    pub fn check_size(&self, declared: Option<u64>) -> FetchResult<()> {
        match declared {
            Some(size) if size > self.config.max_file_size => Err(FetchError::TooLarge {
                size,
                limit: self.config.max_file_size,
            }),
            _ => Ok(()),
        }
    }

    /// Ask for headers only
    ///
    /// Probing is advisory: failures are logged and reported as "nothing known".
    pub async fn probe(&self, url: &Url) -> ProbeInfo {
        let result = self
            .client
            .head(url.clone())
            .timeout(self.config.probe_timeout)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => ProbeInfo {
                // A zero length on HEAD usually means "not reported"
                content_length: header_length(response.headers()).filter(|len| *len > 0),
                content_type: header_string(response.headers(), CONTENT_TYPE),
            },
            Ok(response) => {
                tracing::warn!("Size probe for {} returned {}", url, response.status());
                ProbeInfo::default()
            }
            Err(e) => {
                tracing::warn!("Size probe for {} failed: {}", url, e);
                ProbeInfo::default()
            }
        }
    }

    /// Validate, probe and open the download without reading the body
    ///
    /// # Errors
    /// `InvalidUrl` before any network access, `TooLarge` when a declared
    /// length exceeds the ceiling, `UnsupportedType` for disallowed
    /// extensions, `DownloadFailed` for network errors and non-2xx answers.
    pub async fn open(&self, raw: &str) -> FetchResult<RemoteFile> {
        let url = validate_url(raw)?;

        let probe = self.probe(&url).await;
        self.check_size(probe.content_length)?;

        tracing::info!("Starting download from {}", url);
        let started = Instant::now();
        let request = self.client.get(url.clone()).send();
        let response = match tokio::time::timeout(self.config.read_timeout, request).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::error!("Download request to {} failed: {}", url, e);
                return Err(e.into());
            }
            Err(_) => {
                tracing::error!("Download request to {} timed out", url);
                return Err(FetchError::DownloadFailed(
                    "the server took too long to respond".to_string(),
                ));
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Download of {} answered with {}", url, status);
            return Err(FetchError::DownloadFailed(format!(
                "server responded with {}",
                status
            )));
        }

        let declared = header_length(response.headers());
        self.check_size(declared)?;

        let content_type =
            header_string(response.headers(), CONTENT_TYPE).or(probe.content_type);
        let filename = resolve_filename(&url, content_type.as_deref());
        if !is_extension_allowed(&filename) {
            return Err(FetchError::UnsupportedType(filename));
        }

        Ok(RemoteFile {
            url,
            filename,
            content_type,
            content_length: declared.or(probe.content_length),
            response,
            started,
        })
    }

    /// Stream the body of `remote` into a fresh staged file
    ///
    /// On any error the partial file is removed before returning.
    pub async fn download(
        &self,
        remote: RemoteFile,
        progress: &watch::Sender<Progress>,
    ) -> FetchResult<Download> {
        let RemoteFile {
            url,
            filename,
            content_type,
            content_length,
            response,
            started,
        } = remote;

        let staged = self.staging.stage(&filename)?;
        progress.send_replace(Progress {
            downloaded: 0,
            total: content_length,
        });

        let written = write_body(
            response.bytes_stream(),
            staged.path(),
            self.config.max_file_size,
            self.config.read_timeout,
            content_length,
            progress,
        )
        .await;

        let bytes = match written {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!(
                    "Download of {} aborted after {} bytes: {}",
                    url,
                    progress.borrow().downloaded,
                    e
                );
                return Err(e);
            }
        };

        if bytes == 0 {
            tracing::warn!("Download of {} returned an empty body", url);
            return Err(FetchError::EmptyFile);
        }

        let stats = TransferStats::new(bytes, started.elapsed());
        tracing::info!(
            "Downloaded {} ({} bytes) from {} in {:?}",
            filename,
            bytes,
            url,
            stats.elapsed
        );

        Ok(Download {
            filename,
            content_type,
            stats,
            file: staged,
        })
    }
}

/// Copy a chunked body to `path`, enforcing the ceiling on the live count
///
/// Returns the number of bytes written. A chunk that would push the total
/// past `limit` is never written.
pub(crate) async fn write_body<S, B, E>(
    body: S,
    path: &Path,
    limit: u64,
    read_timeout: Duration,
    total: Option<u64>,
    progress: &watch::Sender<Progress>,
) -> FetchResult<u64>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    FetchError: From<E>,
{
    let mut body = pin!(body);
    let mut file = tokio::fs::File::create(path).await?;
    let mut downloaded: u64 = 0;

    loop {
        let next = tokio::time::timeout(read_timeout, body.next())
            .await
            .map_err(|_| {
                FetchError::DownloadFailed(format!(
                    "no data received for {}s",
                    read_timeout.as_secs()
                ))
            })?;

        let chunk = match next {
            Some(chunk) => chunk?,
            None => break,
        };
        let chunk = chunk.as_ref();

        downloaded += chunk.len() as u64;
        if downloaded > limit {
            return Err(FetchError::TooLarge {
                size: downloaded,
                limit,
            });
        }

        file.write_all(chunk).await?;
        progress.send_replace(Progress { downloaded, total });
    }

    file.flush().await?;
    Ok(downloaded)
}

fn header_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

fn header_string(headers: &HeaderMap, name: reqwest::header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
