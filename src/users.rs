//! Usage: Username registry reads/writes over sqlite.

use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

use crate::db::{self, DbPool};
use crate::domain::username::{self, UsernameRegistry};

#[derive(Debug, Clone, Serialize)]
pub(crate) struct UserSummary {
    pub id: i64,
    pub username: String,
    pub username_key: String,
    pub created_at: i64,
}

fn now_unix_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Exact-match existence probe on the indexed key column, capped at one row.
pub(crate) fn exists_by_key(conn: &Connection, key: &str) -> Result<bool, String> {
    conn.query_row(
        "SELECT 1 FROM users WHERE username_key = ?1 LIMIT 1",
        params![key],
        |_| Ok(()),
    )
    .optional()
    .map(|found| found.is_some())
    .map_err(|e| format!("DB_ERROR: failed to query username key: {e}"))
}

/// Registers a username under its normalized key. A concurrent claim of the
/// same key loses here on the UNIQUE constraint, which is the only place the
/// check-then-act race gets settled.
pub(crate) fn claim(conn: &Connection, raw_username: &str) -> Result<UserSummary, String> {
    let username = raw_username.trim();
    let key = username::normalize_key(username);
    if key.is_empty() {
        return Err(
            "SEC_INVALID_INPUT: username must contain at least one alphanumeric character"
                .to_string(),
        );
    }

    let now = now_unix_seconds();
    conn.execute(
        "INSERT INTO users(username, username_key, created_at) VALUES (?1, ?2, ?3)",
        params![username, key, now],
    )
    .map_err(|e| match e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            format!("DB_CONSTRAINT: username already taken for key={key}")
        }
        other => format!("DB_ERROR: failed to insert user: {other}"),
    })?;

    get_by_key(conn, &key)
}

fn get_by_key(conn: &Connection, key: &str) -> Result<UserSummary, String> {
    conn.query_row(
        "SELECT id, username, username_key, created_at FROM users WHERE username_key = ?1",
        params![key],
        |row| {
            Ok(UserSummary {
                id: row.get(0)?,
                username: row.get(1)?,
                username_key: row.get(2)?,
                created_at: row.get(3)?,
            })
        },
    )
    .optional()
    .map_err(|e| format!("DB_ERROR: failed to query user: {e}"))?
    .ok_or_else(|| "DB_NOT_FOUND: user not found".to_string())
}

/// Registry capability handed to the availability checker. Checks out a
/// pooled connection per lookup, so a pool failure surfaces as a lookup
/// failure rather than failing validation.
pub(crate) struct PoolUsernameRegistry {
    pool: DbPool,
}

impl PoolUsernameRegistry {
    pub(crate) fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl UsernameRegistry for PoolUsernameRegistry {
    fn exists_by_key(&self, key: &str) -> Result<bool, String> {
        let conn = db::get_conn(&self.pool)?;
        exists_by_key(&conn, key)
    }
}
