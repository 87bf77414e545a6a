// SQLite schema for the verification history.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Create all tables if they don't exist yet. Safe to call on every startup.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS history (
            history_id TEXT PRIMARY KEY,
            original_input TEXT NOT NULL,
            input_type TEXT NOT NULL DEFAULT 'text',
            processed_text TEXT NOT NULL DEFAULT '',
            predicted_label TEXT NOT NULL,
            prob_hoax REAL NOT NULL,
            prob_fakta REAL NOT NULL,
            final_label_threshold TEXT NOT NULL,
            inference_time_ms REAL NOT NULL,
            user_id TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_history_user_created
            ON history(user_id, created_at);
        ",
    )
    .context("Failed to create database tables")?;

    Ok(())
}

pub fn table_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}
