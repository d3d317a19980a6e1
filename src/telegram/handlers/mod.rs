//! Telegram bot handler tree configuration
//!
//! The same schema runs in production and can be driven from integration tests.

mod schema;
mod types;

pub use schema::{handle_text_message, schema};
pub use types::{HandlerDeps, HandlerError};
