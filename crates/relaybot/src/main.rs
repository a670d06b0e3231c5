use fetch::{FetchConfig, Fetcher, StagingArea};
use health::HealthServer;
use teloxide::prelude::*;

mod config;
mod logging;

use config::{ConfigError, Settings, TOKEN_HELP};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    let _ = dotenv::dotenv();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            if e == ConfigError::MissingToken {
                eprintln!("\n{}", TOKEN_HELP);
            }
            std::process::exit(1);
        }
    };

    logging::init(settings.log_format);
    tracing::debug!("Loaded {:?}", settings);

    let staging = match StagingArea::new(settings.staging_dir.as_deref()) {
        Ok(staging) => staging,
        Err(e) => {
            tracing::error!("Failed to create staging directory: {}", e);
            std::process::exit(1);
        }
    };

    let fetcher = match Fetcher::new(FetchConfig::default(), staging) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let health = HealthServer::new(settings.health_host.clone(), settings.port);
    tokio::spawn(async move {
        if let Err(e) = health.serve().await {
            tracing::error!("Health server stopped: {}", e);
        }
    });

    let bot = Bot::new(settings.token.clone());

    if let Err(e) = bot.delete_webhook().drop_pending_updates(true).await {
        tracing::warn!("Failed to drop pending updates: {}", e);
    }
    if let Err(e) = telegram::telegram::set_bot_commands(&bot).await {
        tracing::warn!("Failed to register bot commands: {}", e);
    }

    tracing::info!(
        "Bot started (max file size {} bytes, staging in {})",
        fetcher.max_file_size(),
        fetcher.staging_dir().display()
    );

    Dispatcher::builder(bot, telegram::telegram::schema())
        .dependencies(dptree::deps![fetcher])
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    tracing::info!("Bot stopped");
}
