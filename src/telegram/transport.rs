//! Outbound side of the chat transport

use async_trait::async_trait;
use teloxide::prelude::*;

use crate::core::AppResult;

/// Sends text replies to a chat.
///
/// The router only ever talks to this trait, so tests can record replies instead of
/// calling the Bot API.
#[async_trait]
pub trait Replier: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: String) -> AppResult<()>;
}

#[async_trait]
impl Replier for Bot {
    async fn send_text(&self, chat_id: ChatId, text: String) -> AppResult<()> {
        self.send_message(chat_id, text).await?;
        Ok(())
    }
}
