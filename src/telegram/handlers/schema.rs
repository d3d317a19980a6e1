//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use super::types::{HandlerDeps, HandlerError};

/// Creates the dispatcher schema for the bot.
///
/// Only text messages reach the router; stickers, photos and other updates fall
/// through unhandled.
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    dptree::entry().branch(message_handler(deps))
}

/// Handler for every text message
fn message_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message()
        .filter(|msg: Message| msg.text().is_some())
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move {
                handle_text_message(&bot, &msg, &deps).await;
                Ok(())
            }
        })
}

/// Log an inbound message and route it
pub async fn handle_text_message(bot: &Bot, msg: &Message, deps: &HandlerDeps) {
    let Some(text) = msg.text() else {
        return;
    };

    log::info!(
        "Received message from {}[{}]: {}",
        msg.chat.username().unwrap_or("-"),
        msg.chat.id,
        text
    );
    deps.router.handle(bot, msg.chat.id, text).await;
}
