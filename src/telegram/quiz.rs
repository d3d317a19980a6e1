use std::collections::HashMap;
use std::sync::Arc;
use teloxide::types::ChatId;
use tokio::sync::Mutex;

/// Answers awaited from chats that were sent a `/random` word.
///
/// One slot per chat, memory only: a restart forgets every open quiz. Cloning shares
/// the same map.
#[derive(Clone, Default)]
pub struct QuizState {
    pending: Arc<Mutex<HashMap<ChatId, String>>>,
}

impl QuizState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember the answer expected from `chat_id`, replacing any previous one
    pub async fn set(&self, chat_id: ChatId, answer: impl Into<String>) {
        let mut pending = self.pending.lock().await;
        pending.insert(chat_id, answer.into());
    }

    /// Remove and return the answer expected from `chat_id`
    pub async fn take(&self, chat_id: ChatId) -> Option<String> {
        let mut pending = self.pending.lock().await;
        pending.remove(&chat_id)
    }

    /// The answer expected from `chat_id`, left in place
    pub async fn pending(&self, chat_id: ChatId) -> Option<String> {
        let pending = self.pending.lock().await;
        pending.get(&chat_id).cloned()
    }

    /// Number of chats with an open quiz
    pub async fn len(&self) -> usize {
        self.pending.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pending.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_take_consumes_answer() {
        let quiz = QuizState::new();
        quiz.set(ChatId(1), "apple").await;

        assert_eq!(quiz.take(ChatId(1)).await.as_deref(), Some("apple"));
        assert_eq!(quiz.take(ChatId(1)).await, None);
    }

    #[tokio::test]
    async fn test_set_overwrites_previous_answer() {
        let quiz = QuizState::new();
        quiz.set(ChatId(1), "apple").await;
        quiz.set(ChatId(1), "pear").await;

        assert_eq!(quiz.pending(ChatId(1)).await.as_deref(), Some("pear"));
        assert_eq!(quiz.len().await, 1);
    }

    #[tokio::test]
    async fn test_chats_are_independent() {
        let quiz = QuizState::new();
        quiz.set(ChatId(1), "apple").await;
        quiz.set(ChatId(2), "pear").await;

        quiz.take(ChatId(1)).await;

        assert_eq!(quiz.pending(ChatId(2)).await.as_deref(), Some("pear"));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let quiz = QuizState::new();
        let other = quiz.clone();
        quiz.set(ChatId(3), "sky").await;

        assert_eq!(other.take(ChatId(3)).await.as_deref(), Some("sky"));
        assert!(quiz.is_empty().await);
    }
}
