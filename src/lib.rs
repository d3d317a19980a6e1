//! kquiz - Telegram vocabulary trainer
//!
//! Users register through the bot, store word/translation pairs under their chat,
//! and get quizzed on a random word; their next message is checked as the answer.
//!
//! # Module Structure
//!
//! - `core`: configuration, errors, and logging
//! - `storage`: bucketed key-value store on SQLite and the vocabulary repository
//! - `telegram`: command parsing, quiz state, routing, and the dispatcher schema
//! - `cli`: command line interface of the binary

pub mod cli;
pub mod core;
pub mod storage;
pub mod telegram;

// Re-export commonly used types for convenience
pub use crate::core::{config, AppError, AppResult};
pub use storage::{KvStore, Vocabulary, WordError, WordPair, WordRepository};
pub use telegram::{schema, CommandRouter, HandlerDeps, QuizState};
