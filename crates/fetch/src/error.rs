use std::fmt;

/// Errors produced while validating, probing or downloading a link
#[derive(Debug)]
pub enum FetchError {
    /// Input is not an absolute http(s) URL with a host
    InvalidUrl(String),
    /// Declared or observed size exceeds the upload ceiling
    TooLarge { size: u64, limit: u64 },
    /// Resolved filename has an extension outside the allow-list
    UnsupportedType(String),
    /// Server returned an empty body
    EmptyFile,
    /// Network or HTTP failure while fetching the body
    DownloadFailed(String),
    /// Local staging failure
    Io(std::io::Error),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            FetchError::TooLarge { size, limit } => {
                write!(f, "File too large: {} bytes (limit {} bytes)", size, limit)
            }
            FetchError::UnsupportedType(name) => write!(f, "Unsupported file type: {}", name),
            FetchError::EmptyFile => write!(f, "Downloaded file is empty"),
            FetchError::DownloadFailed(msg) => write!(f, "Download failed: {}", msg),
            FetchError::Io(e) => write!(f, "Staging error: {}", e),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        FetchError::Io(err)
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            "the server took too long to respond".to_string()
        } else if err.is_connect() {
            "cannot connect to the server".to_string()
        } else if err.is_redirect() {
            "too many redirects".to_string()
        } else if let Some(status) = err.status() {
            format!("server responded with {}", status)
        } else {
            err.to_string()
        };
        FetchError::DownloadFailed(reason)
    }
}

/// Result type alias for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;
