//! Handler types and dependencies

use std::sync::Arc;

use crate::storage::Vocabulary;
use crate::telegram::quiz::QuizState;
use crate::telegram::router::CommandRouter;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub router: CommandRouter,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(words: Arc<dyn Vocabulary>, quiz: QuizState) -> Self {
        Self {
            router: CommandRouter::new(words, quiz),
        }
    }
}
