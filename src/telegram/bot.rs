//! Bot instance creation and the command menu

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::types::BotCommand;

use crate::core::config;
use crate::core::{AppError, AppResult};

/// Commands shown in the Telegram client menu, with their descriptions
pub const MENU_COMMANDS: &[(&str, &str)] = &[
    ("register", "start receiving quizzes"),
    ("unregister", "stop and forget the registration"),
    ("add", "add a word: /add <word> <translation>"),
    ("search", "show the translation: /search <word>"),
    ("random", "quiz me on a random word"),
    ("delete", "remove a word: /delete <word>"),
    ("list", "list all my words"),
    ("clear", "remove all my words"),
];

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(AppError)` - Token missing, invalid `BOT_API_URL`, or HTTP client failure
pub fn create_bot() -> AppResult<Bot> {
    let token = config::BOT_TOKEN.as_str();
    if token.is_empty() {
        return Err(AppError::Config("BOT_TOKEN environment variable not set".to_string()));
    }

    let client = ClientBuilder::new()
        .timeout(config::network::timeout())
        .build()
        .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;
    let bot = Bot::with_client(token, client);

    let bot = match config::BOT_API_URL.as_deref() {
        Some(bot_api_url) => {
            log::info!("Using custom Bot API URL: {}", bot_api_url);
            let url = url::Url::parse(bot_api_url).map_err(|e| AppError::Config(format!("Invalid BOT_API_URL: {}", e)))?;
            bot.set_api_url(url)
        }
        None => bot,
    };

    Ok(bot)
}

/// Sets up bot commands in Telegram UI
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = MENU_COMMANDS
        .iter()
        .map(|(command, description)| BotCommand::new(*command, *description))
        .collect();

    bot.set_my_commands(commands).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telegram::commands::ChatCommand;

    #[test]
    fn test_menu_commands_are_routed() {
        for (command, _) in MENU_COMMANDS {
            let text = format!("/{} word translation", command);
            assert!(
                !matches!(ChatCommand::parse(&text), ChatCommand::Text(_)),
                "/{} is in the menu but not handled",
                command
            );
        }
    }

    #[test]
    fn test_menu_commands_are_valid_for_telegram() {
        for (command, description) in MENU_COMMANDS {
            assert!(command.len() <= 32);
            assert!(command.chars().all(|c| c.is_ascii_lowercase() || c == '_'));
            assert!(!description.is_empty() && description.len() <= 256);
        }
    }
}
