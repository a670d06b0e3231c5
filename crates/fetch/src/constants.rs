//! Constants shared by the download pipeline

use std::time::Duration;

/// Largest file the Bot API accepts from a bot upload (50 MiB)
pub const MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Timeout for the header-only size probe
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for establishing a connection
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest silence tolerated between two body chunks
pub const READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum number of redirect hops followed for one request
pub const MAX_REDIRECTS: usize = 10;

/// Longest filename kept after sanitising
pub const MAX_FILENAME_LENGTH: usize = 100;

/// Extension used when nothing better can be guessed
pub const FALLBACK_EXTENSION: &str = "bin";

/// User agent sent with every request
pub const USER_AGENT: &str = concat!("relaybot/", env!("CARGO_PKG_VERSION"));

/// File extensions accepted for relaying (lowercase, without dot)
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    // video
    "mp4", "avi", "mkv", "mov", "wmv", "flv", "webm",
    // audio
    "mp3", "wav", "ogg", "m4a", "flac",
    // documents
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "txt",
    // archives
    "zip", "rar", "7z", "tar", "gz",
    // images
    "jpg", "jpeg", "png", "gif", "bmp", "webp",
    // applications
    "apk", "exe", "dmg", "iso",
    // generic binary
    "bin",
];
