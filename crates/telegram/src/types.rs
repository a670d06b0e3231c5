use teloxide::macros::BotCommands;

/// Type alias for handler result types
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Available bot commands
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
pub enum Command {
    #[command(description = "Show the welcome message")]
    Start,
    #[command(description = "Display help information")]
    Help,
    #[command(description = "Check that the bot is alive")]
    Status,
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::utils::command::BotCommands;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/start", "relaybot").unwrap(), Command::Start);
        assert_eq!(Command::parse("/help", "relaybot").unwrap(), Command::Help);
        assert_eq!(Command::parse("/status@relaybot", "relaybot").unwrap(), Command::Status);
        assert!(Command::parse("/cancel", "relaybot").is_err());
        assert!(Command::parse("https://example.com/file.pdf", "relaybot").is_err());
    }

    #[test]
    fn test_descriptions_list_every_command() {
        let text = Command::descriptions().to_string();
        for name in ["/start", "/help", "/status"] {
            assert!(text.contains(name), "{} missing from {}", name, text);
        }
    }
}
