//! Usage: SQLite pool construction + schema init.

pub(crate) mod migrations;

use std::path::Path;

use r2d2_sqlite::SqliteConnectionManager;

pub(crate) type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub(crate) type DbConnection = r2d2::PooledConnection<SqliteConnectionManager>;

const DB_FILE_NAME: &str = "bracket-hub.sqlite3";
const POOL_MAX_SIZE: u32 = 8;

pub(crate) fn init(data_dir: &Path) -> Result<DbPool, String> {
    let path = data_dir.join(DB_FILE_NAME);
    let manager = SqliteConnectionManager::file(&path).with_init(|conn| {
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(())
    });

    let pool = r2d2::Pool::builder()
        .max_size(POOL_MAX_SIZE)
        .build(manager)
        .map_err(|e| format!("DB_ERROR: failed to build sqlite pool: {e}"))?;

    let mut conn = get_conn(&pool)?;
    migrations::apply_migrations(&mut conn)?;

    Ok(pool)
}

pub(crate) fn get_conn(pool: &DbPool) -> Result<DbConnection, String> {
    pool.get()
        .map_err(|e| format!("DB_ERROR: failed to check out sqlite connection: {e}"))
}

#[cfg(test)]
pub(crate) fn open_test_pool() -> DbPool {
    let manager = SqliteConnectionManager::memory().with_init(|conn| {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(())
    });
    // One connection keeps the in-memory database alive across checkouts.
    let pool = r2d2::Pool::builder()
        .max_size(1)
        .build(manager)
        .expect("build in-memory pool");
    let mut conn = pool.get().expect("check out in-memory connection");
    migrations::apply_migrations(&mut conn).expect("apply migrations");
    drop(conn);
    pool
}
