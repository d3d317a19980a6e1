use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;

use kquiz::cli::{Cli, Commands};
use kquiz::core::{config, init_logger, install_panic_hook};
use kquiz::storage::{KvStore, Vocabulary, WordError, WordRepository};
use kquiz::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps, QuizState};

/// Main entry point
///
/// Parses CLI arguments and dispatches to the subcommand; running the bot is the
/// default.
///
/// # Errors
/// Returns an error if initialization fails (logging, database, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    install_panic_hook();

    // Load environment variables from .env if present, before any config is read
    let _ = dotenv();

    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        Some(Commands::Run) | None => run_bot().await,
        Some(Commands::Export { chat_id, json }) => run_export(chat_id, json),
    }
}

/// Open the store and make sure both buckets exist
fn open_repository() -> Result<WordRepository> {
    let database_path = config::DATABASE_PATH.as_str();
    let store = KvStore::open(database_path).with_context(|| format!("Failed to open database {}", database_path))?;

    WordRepository::new(
        store,
        &config::buckets::REGISTRATION,
        &config::buckets::VOCABULARY,
    )
    .context("Failed to create buckets")
}

/// Run the Telegram bot
async fn run_bot() -> Result<()> {
    log::info!("Starting bot...");

    // The store comes first: without it there is nothing to serve
    let words = Arc::new(open_repository()?);

    let bot = create_bot()?;
    let me = bot.get_me().await.context("Failed to connect to Bot API")?;
    log::info!("Bot username: {:?}, Bot ID: {}", me.username.as_deref(), me.id);

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let quiz = QuizState::new();
    let handler = schema(HandlerDeps::new(words, quiz.clone()));

    log::info!("Starting bot in long polling mode");

    // A single distribution key puts every update in one queue: messages are handled
    // strictly one after another, across all chats.
    Dispatcher::builder(bot, handler)
        .distribution_function(|_| Some(()))
        .default_handler(|update| async move {
            log::debug!("Ignoring update {}", update.id.0);
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!(
        "Dispatcher shut down with {} quiz(zes) unanswered, closing database",
        quiz.len().await
    );
    Ok(())
}

/// Print a chat's vocabulary without contacting Telegram
fn run_export(chat_id: i64, json: bool) -> Result<()> {
    let words = open_repository()?;

    let pairs = match words.list(chat_id) {
        Ok(pairs) => pairs,
        Err(WordError::WordNotFound) => Vec::new(),
        Err(e) => return Err(e).with_context(|| format!("Failed to list words of chat {}", chat_id)),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&pairs)?);
    } else {
        for pair in &pairs {
            println!("{} -> {}", pair.word, pair.translation);
        }
    }

    Ok(())
}
