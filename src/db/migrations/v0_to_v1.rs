use rusqlite::Connection;

use super::set_user_version;

pub(super) fn migrate_v0_to_v1(conn: &mut Connection) -> Result<(), String> {
    let tx = conn
        .transaction()
        .map_err(|e| format!("failed to start migration transaction: {e}"))?;

    // username_key is the normalized identity key; the UNIQUE constraint both
    // backs the exact-match availability lookup and settles claim races.
    tx.execute_batch(
        r#"
CREATE TABLE users (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  username TEXT NOT NULL,
  username_key TEXT NOT NULL,
  created_at INTEGER NOT NULL,
  UNIQUE(username_key)
);

CREATE TABLE user_brackets (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  username_key TEXT NOT NULL,
  year INTEGER NOT NULL,
  picks_json TEXT NOT NULL,
  created_at INTEGER NOT NULL,
  updated_at INTEGER NOT NULL,
  UNIQUE(username_key, year),
  FOREIGN KEY(username_key) REFERENCES users(username_key) ON DELETE CASCADE
);
"#,
    )
    .map_err(|e| format!("migration v0->v1 failed: {e}"))?;

    set_user_version(&tx, 1)?;

    tx.commit()
        .map_err(|e| format!("failed to commit migration v0->v1: {e}"))?;

    Ok(())
}
