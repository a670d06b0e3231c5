//! Startup configuration read from the environment

use std::fmt;
use std::path::PathBuf;

/// Default port of the health server
pub const DEFAULT_PORT: u16 = 10000;

/// Default bind address of the health server
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Process-wide settings, fixed for the lifetime of the process
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub token: String,
    pub health_host: String,
    pub port: u16,
    pub staging_dir: Option<PathBuf>,
    pub log_format: LogFormat,
}

// Keeps the token out of logs
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("token", &"<redacted>")
            .field("health_host", &self.health_host)
            .field("port", &self.port)
            .field("staging_dir", &self.staging_dir)
            .field("log_format", &self.log_format)
            .finish()
    }
}

/// Fatal configuration problems
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// BOT_TOKEN is unset or blank
    MissingToken,
    /// PORT is not a valid port number
    InvalidPort(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingToken => write!(f, "BOT_TOKEN environment variable is not set"),
            ConfigError::InvalidPort(value) => write!(f, "PORT '{}' is not a valid port", value),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Settings {
    /// Read settings from the process environment
    ///
    /// # Errors
    /// Returns an error if `BOT_TOKEN` is missing or `PORT` is malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let token = non_empty("BOT_TOKEN").ok_or(ConfigError::MissingToken)?;

        let port = match non_empty("PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(value))?,
            None => DEFAULT_PORT,
        };

        let log_format = match non_empty("LOG_FORMAT").as_deref() {
            Some(format) if format.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            token,
            health_host: non_empty("HEALTH_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            staging_dir: non_empty("STAGING_DIR").map(PathBuf::from),
            log_format,
        })
    }
}

/// Printed when the token is missing
pub const TOKEN_HELP: &str = "To set it up:\n\
    1. Create a bot on Telegram with @BotFather\n\
    2. Copy the bot token\n\
    3. Set it as environment variable, e.g. export BOT_TOKEN='your_token_here'\n   \
    or put BOT_TOKEN=... into a .env file in the working directory";
