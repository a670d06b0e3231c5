//! Basic bot commands (start, help, status)

use chrono::Local;
use fetch::Fetcher;
use teloxide::{prelude::*, utils::command::BotCommands};

use crate::constants::{emoji, text};
use crate::handlers;
use crate::types::{Command, HandlerResult};
use crate::utils::format_size;

fn welcome_text(name: &str, max_file_size: u64) -> String {
    format!(
        "{} {}",
        emoji::ROBOT,
        text::WELCOME
            .replace("{name}", name)
            .replace("{max_size}", &format_size(max_file_size))
    )
}

fn help_text(max_file_size: u64) -> String {
    format!(
        "{} {}\n\n{}",
        emoji::BOOK,
        text::HELP.replace("{max_size}", &format_size(max_file_size)),
        Command::descriptions()
    )
}

/// Welcome message when user starts the bot
pub async fn start(bot: Bot, msg: Message, fetcher: Fetcher) -> HandlerResult {
    let name = msg
        .from()
        .map(|user| user.first_name.clone())
        .unwrap_or_else(|| "there".to_string());

    bot.send_message(msg.chat.id, welcome_text(&name, fetcher.max_file_size()))
        .await?;
    Ok(())
}

/// Display usage, troubleshooting and the command list
pub async fn help(bot: Bot, msg: Message, fetcher: Fetcher) -> HandlerResult {
    bot.send_message(msg.chat.id, help_text(fetcher.max_file_size()))
        .await?;
    Ok(())
}

/// Liveness acknowledgment; nothing is measured
pub async fn status(bot: Bot, msg: Message, fetcher: Fetcher) -> HandlerResult {
    let status = format!(
        "{} Bot Status\n\
        • Server time: {}\n\
        • Max file size: {}\n\
        • Ready: {}\n\n\
        Storage:\n\
        • Temp directory: {}\n\
        • Files are removed right after delivery",
        emoji::INFO,
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        format_size(fetcher.max_file_size()),
        emoji::SUCCESS,
        fetcher.staging_dir().display()
    );

    handlers::send_text(&bot, msg.chat.id, status).await
}

/// Reply for messages that carry no text at all
pub async fn invalid_input(bot: Bot, msg: Message) -> HandlerResult {
    handlers::send_text(&bot, msg.chat.id, text::INVALID_INPUT).await
}
