use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use std::time::Duration;

use super::migrations::run_migrations;
use super::StoreError;
use crate::core::config;

pub type DbPool = Pool<SqliteConnectionManager>;

/// Create a new database connection pool
///
/// Every connection gets a busy timeout and enforced foreign keys. The schema is
/// migrated on the first connection, and a failure there is returned: a store that
/// cannot be migrated is not usable.
///
/// # Example
///
/// ```no_run
/// use kquiz::storage::create_pool;
///
/// let pool = create_pool("kquiz.sqlite")?;
/// # Ok::<(), kquiz::storage::StoreError>(())
/// ```
pub fn create_pool(database_path: &str) -> Result<DbPool, StoreError> {
    let manager = SqliteConnectionManager::file(database_path).with_init(|conn| {
        conn.busy_timeout(Duration::from_millis(config::database::BUSY_TIMEOUT_MS))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")
    });
    let pool = Pool::builder()
        .max_size(config::database::POOL_MAX_SIZE)
        .build(manager)?;

    let mut conn = pool.get()?;
    run_migrations(&mut conn)?;

    Ok(pool)
}
