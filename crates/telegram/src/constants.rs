//! Constants used throughout the telegram bot

use std::time::Duration;

/// Minimum delay between two progress edits of the status message
pub const PROGRESS_INTERVAL: Duration = Duration::from_secs(3);

/// Number of segments in the progress bar
pub const PROGRESS_BAR_WIDTH: usize = 20;

/// Largest image sent as a photo; bigger images go out as documents
pub const MAX_PHOTO_SIZE: u64 = 10 * 1024 * 1024;

/// Pause before the single upload retry
pub const UPLOAD_RETRY_DELAY: Duration = Duration::from_secs(3);

/// Longest error detail shown to users
pub const MAX_ERROR_DETAIL: usize = 200;

/// Emoji constants for consistent UI
pub mod emoji {
    pub const SUCCESS: &str = "✅";
    pub const ERROR: &str = "❌";
    pub const WARNING: &str = "⚠️";
    pub const INFO: &str = "📊";
    pub const SEARCH: &str = "🔍";
    pub const FILE: &str = "📄";
    pub const FOLDER: &str = "📁";
    pub const DOWNLOAD: &str = "⬇️";
    pub const UPLOAD: &str = "📤";
    pub const SIZE: &str = "💾";
    pub const TIME: &str = "⏱";
    pub const SPEED: &str = "⚡";
    pub const ROBOT: &str = "🤖";
    pub const BOOK: &str = "📚";
}

/// Static texts for the basic commands
pub mod text {
    /// `{name}` and `{max_size}` are substituted at runtime; the emoji prefix is added by the command
    pub const WELCOME: &str = "Welcome {name}!\n\n\
        I'm your personal download assistant. I can download files from direct links and send them to you.\n\n\
        How to use:\n\
        1. Send me any direct download link (HTTP/HTTPS)\n\
        2. I'll download it and send it back to you\n\n\
        Supported files:\n\
        • Videos (MP4, AVI, MKV, etc.)\n\
        • Documents (PDF, DOC, XLS, PPT, etc.)\n\
        • Archives (ZIP, RAR, 7Z, etc.)\n\
        • Images (JPG, PNG, GIF, etc.)\n\
        • Audio (MP3, WAV, etc.)\n\
        • Apps (APK, EXE, DMG, etc.)\n\n\
        Limits:\n\
        • Max file size: {max_size} (Telegram limit)\n\
        • Direct links only (no streaming sites)\n\n\
        Just send me a link to get started!";

    /// `{max_size}` is substituted at runtime
    pub const HELP: &str = "Help Guide\n\n\
        What I can download:\n\
        Any file accessible via a direct HTTP/HTTPS link, for example:\n\
        • https://example.com/files/video.mp4\n\
        • https://cdn.example.com/document.pdf\n\n\
        File size limits:\n\
        • Maximum: {max_size} (Telegram Bot API limit)\n\
        • Larger files are rejected automatically\n\n\
        Troubleshooting:\n\
        ❌ \"Invalid URL\" - Make sure it starts with http:// or https://\n\
        ❌ \"File too large\" - File exceeds {max_size}\n\
        ❌ \"Download failed\" - Server might be blocking bots or link is broken\n\
        ⚠️ \"Unsupported file type\" - File type not in allowed list";

    pub const INVALID_INPUT: &str =
        "❌ Please send a valid URL\nSend a direct HTTP/HTTPS link starting with http:// or https://";
}
