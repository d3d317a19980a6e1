//! Command dispatch: one inbound message in, zero or more replies out

use std::sync::Arc;
use teloxide::types::ChatId;

use super::commands::ChatCommand;
use super::quiz::QuizState;
use super::transport::Replier;
use crate::storage::Vocabulary;

/// Routes parsed chat commands to the vocabulary and quiz state.
///
/// Holds no per-chat state of its own; the only memory between messages is the
/// [`QuizState`] it was given.
#[derive(Clone)]
pub struct CommandRouter {
    words: Arc<dyn Vocabulary>,
    quiz: QuizState,
}

impl CommandRouter {
    pub fn new(words: Arc<dyn Vocabulary>, quiz: QuizState) -> Self {
        Self { words, quiz }
    }

    pub fn quiz(&self) -> &QuizState {
        &self.quiz
    }

    /// Handle one inbound text message from `chat_id`.
    ///
    /// Any pending quiz answer of the chat is consumed by this message, whatever it
    /// is; only plain text is judged against it. Replies go out through `replier`, and
    /// a failed send is logged and dropped.
    pub async fn handle(&self, replier: &dyn Replier, chat_id: ChatId, text: &str) {
        let command = ChatCommand::parse(text);
        let pending = self.quiz.take(chat_id).await;
        let id = chat_id.0;
        if pending.is_some() && !matches!(command, ChatCommand::Text(_)) {
            log::debug!("Chat {} sent a {} command instead of an answer, quiz dropped", id, command.name());
        }

        // Store calls are synchronous SQLite on this task; the dispatcher runs one update at a time.
        match command {
            ChatCommand::Register => {
                let reply = match self.words.register(id) {
                    Ok(()) => "Thanks for your registration.".to_string(),
                    Err(e) => format!("Registration failed. {}.", e),
                };
                send(replier, chat_id, reply, "registration").await;
            }
            ChatCommand::Unregister => {
                let reply = match self.words.unregister(id) {
                    Ok(()) => {
                        "You have been successfully unregistered. You will not receive any future updates.".to_string()
                    }
                    Err(e) => format!("Unregistration failed. {}.", e),
                };
                send(replier, chat_id, reply, "unregistration").await;
            }
            ChatCommand::Add { word, translation } => {
                let reply = match self.words.add(id, word, translation) {
                    Ok(()) => format!("New word successfully added. {} -> {}.", word, translation),
                    Err(e) => format!("Add word failed. {}.", e),
                };
                send(replier, chat_id, reply, "add word").await;
            }
            ChatCommand::Search(word) => {
                let reply = match self.words.search(id, word) {
                    Ok(translation) => format!("{} -> {}.", word, translation),
                    Err(e) => format!("Search word failed. {}.", e),
                };
                send(replier, chat_id, reply, "search word").await;
            }
            ChatCommand::Random => match self.words.random(id) {
                Ok(pair) => {
                    send(
                        replier,
                        chat_id,
                        format!("What is translation for: {}", pair.word),
                        "random word",
                    )
                    .await;
                    self.quiz.set(chat_id, pair.translation).await;
                }
                Err(e) => {
                    send(replier, chat_id, format!("Get random word failed. {}.", e), "random word").await;
                }
            },
            ChatCommand::Delete(word) => {
                let reply = match self.words.delete(id, word) {
                    Ok(()) => format!("{} deleted.", word),
                    Err(e) => format!("Delete word failed. {}.", e),
                };
                send(replier, chat_id, reply, "delete word").await;
            }
            ChatCommand::List => match self.words.list(id) {
                Ok(pairs) => {
                    for pair in pairs {
                        send(
                            replier,
                            chat_id,
                            format!("{} -> {}", pair.word, pair.translation),
                            "list words",
                        )
                        .await;
                    }
                }
                Err(e) => {
                    send(replier, chat_id, format!("List words failed. {}.", e), "list words").await;
                }
            },
            ChatCommand::Clear => {
                let reply = match self.words.clear(id) {
                    Ok(()) => "Words cleared.".to_string(),
                    Err(e) => format!("Clear words failed. {}.", e),
                };
                send(replier, chat_id, reply, "clear words").await;
            }
            ChatCommand::Usage(prompt) => {
                send(replier, chat_id, prompt.to_string(), "usage prompt").await;
            }
            ChatCommand::Text(answer) => match pending {
                Some(expected) => {
                    let reply = if answer.to_lowercase() == expected.to_lowercase() {
                        "Your answer is correct".to_string()
                    } else {
                        format!("Your answer is incorrect. Correct answer is {}.", expected)
                    };
                    send(replier, chat_id, reply, "answer").await;
                }
                None => log::info!("Unknown command [{}] from chat {}", answer, id),
            },
        }
    }
}

async fn send(replier: &dyn Replier, chat_id: ChatId, text: String, what: &str) {
    if let Err(e) = replier.send_text(chat_id, text).await {
        log::warn!("Failed to respond to {} request in chat {}: {}", what, chat_id, e);
    }
}
