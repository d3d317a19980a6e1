//! Telegram bot integration and handlers

pub mod bot;
pub mod commands;
pub mod handlers;
pub mod quiz;
pub mod router;
pub mod transport;

// Re-exports for convenience
pub use bot::{create_bot, setup_bot_commands};
pub use commands::ChatCommand;
pub use handlers::{handle_text_message, schema, HandlerDeps, HandlerError};
pub use quiz::QuizState;
pub use router::CommandRouter;
pub use transport::Replier;
