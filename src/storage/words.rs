//! Registrations and per-chat vocabulary
//!
//! Two buckets back this module:
//! - the registration bucket: key = decimal chat id, value = the same bytes
//! - the vocabulary bucket: key = decimal chat id, a `0x00` byte, then the word;
//!   value = the translation
//!
//! The `0x00` separator keeps chat `1` from matching the entries of chat `12`
//! when scanning by prefix.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::Mutex;
use thiserror::Error;

use super::kv::{KvStore, Tx};
use super::StoreError;

/// Separates the chat id from the word in vocabulary keys
const KEY_SEPARATOR: u8 = 0x00;

/// Why a word operation did not go through.
///
/// The display strings are shown to the user as the failure reason.
#[derive(Error, Debug)]
pub enum WordError {
    #[error("already registered")]
    AlreadyRegistered,

    #[error("not yet registered")]
    NotRegistered,

    #[error("duplicate word")]
    DuplicateWord,

    #[error("word not found")]
    WordNotFound,

    /// The store failed; the cause stays in the error chain and the log.
    #[error("database error")]
    Database(#[from] StoreError),
}

pub type WordResult<T> = Result<T, WordError>;

/// One vocabulary entry of a chat
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct WordPair {
    pub word: String,
    pub translation: String,
}

impl WordPair {
    pub fn new(word: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            translation: translation.into(),
        }
    }
}

/// Everything the command router needs from the vocabulary store.
///
/// Implemented by [`WordRepository`]; tests substitute their own doubles.
pub trait Vocabulary: Send + Sync {
    fn register(&self, chat_id: i64) -> WordResult<()>;
    fn unregister(&self, chat_id: i64) -> WordResult<()>;
    fn add(&self, chat_id: i64, word: &str, translation: &str) -> WordResult<()>;
    fn search(&self, chat_id: i64, word: &str) -> WordResult<String>;
    fn delete(&self, chat_id: i64, word: &str) -> WordResult<()>;
    fn clear(&self, chat_id: i64) -> WordResult<()>;
    fn list(&self, chat_id: i64) -> WordResult<Vec<WordPair>>;
    fn random(&self, chat_id: i64) -> WordResult<WordPair>;
}

/// Vocabulary repository over a [`KvStore`]
pub struct WordRepository {
    store: KvStore,
    registrations: String,
    vocabulary: String,
    rng: Mutex<StdRng>,
}

impl WordRepository {
    /// Create the repository, creating both buckets if they do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns the store error if a bucket cannot be created; the bot cannot serve
    /// without them.
    pub fn new(store: KvStore, registrations: &str, vocabulary: &str) -> Result<Self, StoreError> {
        store.create_bucket_if_not_exists(registrations)?;
        store.create_bucket_if_not_exists(vocabulary)?;

        Ok(Self {
            store,
            registrations: registrations.to_string(),
            vocabulary: vocabulary.to_string(),
            rng: Mutex::new(StdRng::from_entropy()),
        })
    }

    /// Replace the random source used by [`Vocabulary::random`]
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    pub fn is_registered(&self, chat_id: i64) -> WordResult<bool> {
        logged(
            "check registration",
            self.store.view(|tx| self.registered_in(tx, chat_id)),
        )
    }

    /// Whether `word` is stored for the chat, regardless of registration
    pub fn contains(&self, chat_id: i64, word: &str) -> WordResult<bool> {
        let key = word_key(chat_id, word);
        logged(
            "check word",
            self.store
                .view(|tx| Ok(tx.bucket(&self.vocabulary)?.get(&key)?.is_some())),
        )
    }

    /// Pick one of the chat's words uniformly at random using `rng`
    pub fn random_with<R: Rng>(&self, chat_id: i64, rng: &mut R) -> WordResult<WordPair> {
        let mut pairs = self.list(chat_id)?;
        let index = rng.gen_range(0..pairs.len());
        Ok(pairs.swap_remove(index))
    }

    fn registered_in(&self, tx: &Tx<'_>, chat_id: i64) -> WordResult<bool> {
        Ok(tx
            .bucket(&self.registrations)?
            .get(&registration_key(chat_id))?
            .is_some())
    }

    fn ensure_registered(&self, tx: &Tx<'_>, chat_id: i64) -> WordResult<()> {
        if self.registered_in(tx, chat_id)? {
            Ok(())
        } else {
            Err(WordError::NotRegistered)
        }
    }
}

impl Vocabulary for WordRepository {
    fn register(&self, chat_id: i64) -> WordResult<()> {
        let key = registration_key(chat_id);
        logged(
            "register",
            self.store.update(|tx| {
                let bucket = tx.bucket(&self.registrations)?;
                if bucket.get(&key)?.is_some() {
                    return Err(WordError::AlreadyRegistered);
                }
                bucket.put(&key, &key)?;
                Ok(())
            }),
        )
    }

    fn unregister(&self, chat_id: i64) -> WordResult<()> {
        let key = registration_key(chat_id);
        logged(
            "unregister",
            self.store.update(|tx| {
                if !tx.bucket(&self.registrations)?.delete(&key)? {
                    return Err(WordError::NotRegistered);
                }
                Ok(())
            }),
        )
    }

    /// Store a new word.
    ///
    /// Registration is checked before the duplicate check, so an unregistered chat
    /// gets `NotRegistered` even for a word it stored earlier.
    fn add(&self, chat_id: i64, word: &str, translation: &str) -> WordResult<()> {
        let key = word_key(chat_id, word);
        logged(
            "add word",
            self.store.update(|tx| {
                self.ensure_registered(tx, chat_id)?;
                let bucket = tx.bucket(&self.vocabulary)?;
                if bucket.get(&key)?.is_some() {
                    return Err(WordError::DuplicateWord);
                }
                bucket.put(&key, translation.as_bytes())?;
                Ok(())
            }),
        )
    }

    fn search(&self, chat_id: i64, word: &str) -> WordResult<String> {
        let key = word_key(chat_id, word);
        logged(
            "search word",
            self.store.view(|tx| {
                self.ensure_registered(tx, chat_id)?;
                match tx.bucket(&self.vocabulary)?.get(&key)? {
                    Some(value) => Ok(String::from_utf8_lossy(&value).into_owned()),
                    None => Err(WordError::WordNotFound),
                }
            }),
        )
    }

    fn delete(&self, chat_id: i64, word: &str) -> WordResult<()> {
        let key = word_key(chat_id, word);
        logged(
            "delete word",
            self.store.update(|tx| {
                self.ensure_registered(tx, chat_id)?;
                if !tx.bucket(&self.vocabulary)?.delete(&key)? {
                    return Err(WordError::WordNotFound);
                }
                Ok(())
            }),
        )
    }

    fn clear(&self, chat_id: i64) -> WordResult<()> {
        let prefix = chat_prefix(chat_id);
        logged(
            "clear words",
            self.store.update(|tx| {
                self.ensure_registered(tx, chat_id)?;
                let removed = tx.bucket(&self.vocabulary)?.delete_prefix(&prefix)?;
                log::debug!("Cleared {} word(s) of chat {}", removed, chat_id);
                Ok(())
            }),
        )
    }

    /// All words of the chat in key order.
    ///
    /// An empty vocabulary is reported as `WordNotFound`.
    fn list(&self, chat_id: i64) -> WordResult<Vec<WordPair>> {
        let prefix = chat_prefix(chat_id);
        let pairs = logged(
            "list words",
            self.store.view(|tx| {
                self.ensure_registered(tx, chat_id)?;
                let entries = tx.bucket(&self.vocabulary)?.scan_prefix(&prefix)?;
                Ok(entries
                    .into_iter()
                    .map(|(key, value)| {
                        WordPair::new(
                            String::from_utf8_lossy(&key[prefix.len()..]),
                            String::from_utf8_lossy(&value),
                        )
                    })
                    .collect::<Vec<_>>())
            }),
        )?;

        if pairs.is_empty() {
            return Err(WordError::WordNotFound);
        }
        Ok(pairs)
    }

    fn random(&self, chat_id: i64) -> WordResult<WordPair> {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        self.random_with(chat_id, &mut *rng)
    }
}

/// Log store failures once, where they turn into a bare "database error"
fn logged<T>(operation: &str, result: WordResult<T>) -> WordResult<T> {
    if let Err(WordError::Database(e)) = &result {
        log::error!("Failed to {}: {}", operation, e);
    }
    result
}

fn registration_key(chat_id: i64) -> Vec<u8> {
    chat_id.to_string().into_bytes()
}

fn chat_prefix(chat_id: i64) -> Vec<u8> {
    let mut prefix = registration_key(chat_id);
    prefix.push(KEY_SEPARATOR);
    prefix
}

fn word_key(chat_id: i64, word: &str) -> Vec<u8> {
    let mut key = chat_prefix(chat_id);
    key.extend_from_slice(word.as_bytes());
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn repository() -> (TempDir, WordRepository) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("words.sqlite");
        let store = KvStore::open(path.to_str().unwrap()).unwrap();
        let repo = WordRepository::new(store, "telegram", "kquiz").unwrap();
        (dir, repo)
    }

    #[test]
    fn test_word_key_layout() {
        assert_eq!(registration_key(42), b"42".to_vec());
        assert_eq!(chat_prefix(42), b"42\0".to_vec());
        assert_eq!(word_key(42, "cat"), b"42\0cat".to_vec());
        assert_eq!(word_key(-7, "x"), b"-7\0x".to_vec());
    }

    #[test]
    fn test_prefix_of_short_id_does_not_match_longer_id() {
        assert!(!word_key(12, "a").starts_with(&chat_prefix(1)));
        assert!(!word_key(1, "2a").starts_with(&chat_prefix(12)));
    }

    #[test]
    fn test_register_stores_id_as_marker() {
        let (_dir, repo) = repository();

        repo.register(42).unwrap();

        let marker = repo
            .store
            .view(|tx| tx.bucket("telegram")?.get(b"42"))
            .unwrap();
        assert_eq!(marker, Some(b"42".to_vec()));
        assert!(repo.is_registered(42).unwrap());
    }

    #[test]
    fn test_unregister_keeps_words() {
        let (_dir, repo) = repository();
        repo.register(5).unwrap();
        repo.add(5, "hund", "dog").unwrap();

        repo.unregister(5).unwrap();
        assert!(matches!(repo.search(5, "hund"), Err(WordError::NotRegistered)));
        assert!(repo.contains(5, "hund").unwrap());

        repo.register(5).unwrap();
        assert_eq!(repo.search(5, "hund").unwrap(), "dog");
    }

    #[test]
    fn test_list_strips_only_the_prefix() {
        let (_dir, repo) = repository();
        repo.register(1).unwrap();
        repo.add(1, "1x1", "one by one").unwrap();

        let pairs = repo.list(1).unwrap();

        assert_eq!(pairs, vec![WordPair::new("1x1", "one by one")]);
    }

    #[test]
    fn test_random_with_seeded_rng_is_reproducible() {
        let (_dir, repo) = repository();
        repo.register(9).unwrap();
        for (word, translation) in [("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")] {
            repo.add(9, word, translation).unwrap();
        }

        let first = repo.random_with(9, &mut StdRng::seed_from_u64(7)).unwrap();
        let second = repo.random_with(9, &mut StdRng::seed_from_u64(7)).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_bucket_maps_to_database_error() {
        let (_dir, repo) = repository();
        let repo = WordRepository {
            registrations: "no-such-bucket".to_string(),
            ..repo
        };

        let result = repo.register(1);

        assert!(matches!(result, Err(WordError::Database(StoreError::UnknownBucket(_)))));
        assert_eq!(WordError::Database(StoreError::ReadOnly).to_string(), "database error");
    }
}
