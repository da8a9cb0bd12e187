//! Usage: Saved bracket picks per user/year.

use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct UserBracketSummary {
    pub username_key: String,
    pub year: u16,
    pub picks: serde_json::Value,
    pub updated_at: i64,
}

fn now_unix_seconds() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

pub(crate) fn upsert(
    conn: &Connection,
    username_key: &str,
    year: u16,
    picks: &serde_json::Value,
) -> Result<UserBracketSummary, String> {
    if username_key.is_empty() {
        return Err("SEC_INVALID_INPUT: username_key is required".to_string());
    }

    let picks_json = serde_json::to_string(picks).map_err(|e| format!("SYSTEM_ERROR: {e}"))?;
    let now = now_unix_seconds();

    conn.execute(
        r#"
INSERT INTO user_brackets(username_key, year, picks_json, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?4)
ON CONFLICT(username_key, year) DO UPDATE SET
  picks_json = excluded.picks_json,
  updated_at = excluded.updated_at
"#,
        params![username_key, year, picks_json, now],
    )
    .map_err(|e| match e {
        // Only the foreign key can fire here; the year conflict upserts.
        rusqlite::Error::SqliteFailure(err, _)
            if err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            format!("DB_NOT_FOUND: no registered user for key={username_key}")
        }
        other => format!("DB_ERROR: failed to save bracket: {other}"),
    })?;

    get(conn, username_key, year)?
        .ok_or_else(|| "DB_ERROR: bracket missing after save".to_string())
}

pub(crate) fn get(
    conn: &Connection,
    username_key: &str,
    year: u16,
) -> Result<Option<UserBracketSummary>, String> {
    let row: Option<(String, i64)> = conn
        .query_row(
            "SELECT picks_json, updated_at FROM user_brackets WHERE username_key = ?1 AND year = ?2",
            params![username_key, year],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()
        .map_err(|e| format!("DB_ERROR: failed to query bracket: {e}"))?;

    let Some((picks_json, updated_at)) = row else {
        return Ok(None);
    };

    let picks: serde_json::Value =
        serde_json::from_str(&picks_json).map_err(|e| format!("SYSTEM_ERROR: {e}"))?;

    Ok(Some(UserBracketSummary {
        username_key: username_key.to_string(),
        year,
        picks,
        updated_at,
    }))
}

#[cfg(test)]
mod tests;
