//! Key-value store and the vocabulary repository built on it

pub mod db;
pub mod kv;
pub mod migrations;
pub mod words;

use thiserror::Error;

// Re-exports for convenience
pub use db::{create_pool, DbPool};
pub use kv::{Bucket, KvStore, StoreResult, Tx};
pub use words::{Vocabulary, WordError, WordPair, WordRepository, WordResult};

/// Failures of the key-value store itself
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] refinery::Error),

    #[error("bucket {0:?} does not exist")]
    UnknownBucket(String),

    #[error("write attempted in a read-only transaction")]
    ReadOnly,
}
