//! Common test utilities
//!
//! This module is shared across all integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use teloxide::types::ChatId;

use kquiz::core::{AppError, AppResult};
use kquiz::storage::{KvStore, WordRepository};
use kquiz::telegram::{CommandRouter, QuizState, Replier};

/// Repository on a fresh SQLite file; keep the `TempDir` alive for the test
pub fn temp_repository() -> (TempDir, WordRepository) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("kquiz.sqlite");
    let store = KvStore::open(path.to_str().expect("temp path is not UTF-8")).expect("Failed to open store");
    let repo = WordRepository::new(store, "telegram", "kquiz").expect("Failed to create buckets");
    (dir, repo)
}

/// Router over a fresh repository
pub fn temp_router() -> (TempDir, CommandRouter) {
    let (dir, repo) = temp_repository();
    (dir, CommandRouter::new(Arc::new(repo), QuizState::new()))
}

/// Replier that remembers every message instead of sending it
#[derive(Default)]
pub struct RecordingReplier {
    sent: Mutex<Vec<(ChatId, String)>>,
}

impl RecordingReplier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texts sent so far, oldest first
    pub fn texts(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|(_, text)| text.clone()).collect()
    }

    /// Texts sent so far, emptying the record
    pub fn drain(&self) -> Vec<String> {
        self.sent.lock().unwrap().drain(..).map(|(_, text)| text).collect()
    }

    pub fn chats(&self) -> Vec<ChatId> {
        self.sent.lock().unwrap().iter().map(|(chat, _)| *chat).collect()
    }
}

#[async_trait]
impl Replier for RecordingReplier {
    async fn send_text(&self, chat_id: ChatId, text: String) -> AppResult<()> {
        self.sent.lock().unwrap().push((chat_id, text));
        Ok(())
    }
}

/// Replier whose every send fails, counting the attempts
#[derive(Default)]
pub struct FailingReplier {
    attempts: Mutex<usize>,
}

impl FailingReplier {
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl Replier for FailingReplier {
    async fn send_text(&self, _chat_id: ChatId, _text: String) -> AppResult<()> {
        *self.attempts.lock().unwrap() += 1;
        Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "transport down",
        )))
    }
}
