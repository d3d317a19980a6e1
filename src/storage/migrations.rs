use rusqlite::Connection;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use super::StoreError;
use crate::core::config;

mod embedded {
    use refinery::embed_migrations;

    embed_migrations!("./migrations");
}

static MIGRATION_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Bring the key-value schema up to date.
///
/// refinery runs every pending migration in its own transaction, so the only thing
/// added here is a per-process lock and a busy timeout for a second process that
/// opens the same file.
pub fn run_migrations(conn: &mut Connection) -> Result<(), StoreError> {
    let mutex = MIGRATION_LOCK.get_or_init(|| Mutex::new(()));
    // Migrations are idempotent, a poisoned lock is safe to reuse
    let _guard = match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log::warn!("Migration lock was poisoned, recovering...");
            poisoned.into_inner()
        }
    };

    conn.busy_timeout(Duration::from_millis(config::database::BUSY_TIMEOUT_MS))?;

    let report = embedded::migrations::runner().run(conn)?;
    for migration in report.applied_migrations() {
        log::info!("Applied migration {}", migration);
    }
    Ok(())
}
