//! Bucketed key-value store on top of SQLite
//!
//! Buckets are named namespaces; keys and values are raw bytes. All access goes
//! through a transaction: [`KvStore::view`] for reads, [`KvStore::update`] for writes.
//! An update commits only when its closure returns `Ok`, otherwise every change made
//! inside it is rolled back.

use rusqlite::{params, OptionalExtension, Transaction, TransactionBehavior};
use std::sync::Arc;

use super::db::{create_pool, DbPool};
use super::StoreError;

pub type StoreResult<T> = Result<T, StoreError>;

/// A key and its value, as stored
pub type Entry = (Vec<u8>, Vec<u8>);

#[derive(Clone)]
pub struct KvStore {
    pool: Arc<DbPool>,
}

impl KvStore {
    /// Open (or create) the store file and migrate its schema
    pub fn open(database_path: &str) -> StoreResult<Self> {
        Ok(Self::new(Arc::new(create_pool(database_path)?)))
    }

    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    pub fn create_bucket_if_not_exists(&self, name: &str) -> StoreResult<()> {
        let conn = self.pool.get()?;
        let created = conn.execute("INSERT OR IGNORE INTO buckets (name) VALUES (?1)", [name])?;
        if created > 0 {
            log::info!("Created bucket {}", name);
        }
        Ok(())
    }

    /// Run `f` inside a read-only transaction
    pub fn view<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Tx<'_>) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut conn = self.pool.get().map_err(StoreError::from)?;
        let tx = Tx {
            inner: conn
                .transaction_with_behavior(TransactionBehavior::Deferred)
                .map_err(StoreError::from)?,
            writable: false,
        };
        // Dropping the transaction rolls it back; nothing was written anyway.
        f(&tx)
    }

    /// Run `f` inside a read-write transaction, committing if it succeeds
    pub fn update<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Tx<'_>) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut conn = self.pool.get().map_err(StoreError::from)?;
        let tx = Tx {
            inner: conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(StoreError::from)?,
            writable: true,
        };
        let value = f(&tx)?;
        tx.inner.commit().map_err(StoreError::from)?;
        Ok(value)
    }
}

/// An open transaction
pub struct Tx<'conn> {
    inner: Transaction<'conn>,
    writable: bool,
}

impl Tx<'_> {
    /// Look up a bucket that was created beforehand
    pub fn bucket(&self, name: &str) -> StoreResult<Bucket<'_>> {
        let exists = self
            .inner
            .query_row("SELECT 1 FROM buckets WHERE name = ?1", [name], |_| Ok(()))
            .optional()?
            .is_some();
        if !exists {
            return Err(StoreError::UnknownBucket(name.to_string()));
        }

        Ok(Bucket {
            tx: self,
            name: name.to_string(),
        })
    }
}

/// A bucket seen through a transaction
pub struct Bucket<'tx> {
    tx: &'tx Tx<'tx>,
    name: String,
}

impl Bucket<'_> {
    pub fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        let value = self
            .tx
            .inner
            .query_row(
                "SELECT value FROM entries WHERE bucket = ?1 AND key = ?2",
                params![self.name, key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Insert or overwrite `key`
    pub fn put(&self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        self.ensure_writable()?;
        self.tx.inner.execute(
            "INSERT INTO entries (bucket, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT (bucket, key) DO UPDATE SET value = excluded.value",
            params![self.name, key, value],
        )?;
        Ok(())
    }

    /// Remove `key`, returning whether it was present
    pub fn delete(&self, key: &[u8]) -> StoreResult<bool> {
        self.ensure_writable()?;
        let removed = self.tx.inner.execute(
            "DELETE FROM entries WHERE bucket = ?1 AND key = ?2",
            params![self.name, key],
        )?;
        Ok(removed > 0)
    }

    /// All entries whose key starts with `prefix`, in key byte order
    pub fn scan_prefix(&self, prefix: &[u8]) -> StoreResult<Vec<Entry>> {
        let mut stmt = self
            .tx
            .inner
            .prepare_cached("SELECT key, value FROM entries WHERE bucket = ?1 ORDER BY key")?;
        let rows = stmt.query_map([&self.name], |row| Ok((row.get::<_, Vec<u8>>(0)?, row.get::<_, Vec<u8>>(1)?)))?;

        let mut entries = Vec::new();
        for row in rows {
            let (key, value) = row?;
            if key.starts_with(prefix) {
                entries.push((key, value));
            }
        }
        Ok(entries)
    }

    /// Remove every entry whose key starts with `prefix`, returning how many went
    pub fn delete_prefix(&self, prefix: &[u8]) -> StoreResult<usize> {
        self.ensure_writable()?;
        let mut removed = 0;
        for (key, _) in self.scan_prefix(prefix)? {
            if self.delete(&key)? {
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn ensure_writable(&self) -> StoreResult<()> {
        if self.tx.writable {
            Ok(())
        } else {
            Err(StoreError::ReadOnly)
        }
    }
}
