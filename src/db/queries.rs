// SQLite history queries as free functions over a Connection, so tests can
// run them against an in-memory database directly.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::{HistoryRecord, NewHistoryRow};

pub fn insert_history(conn: &Connection, row: &NewHistoryRow<'_>) -> Result<()> {
    conn.execute(
        "INSERT INTO history (history_id, original_input, input_type, processed_text,
            predicted_label, prob_hoax, prob_fakta, final_label_threshold,
            inference_time_ms, user_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            row.history_id,
            row.original_input,
            row.input_type,
            row.processed_text,
            row.predicted_label,
            row.prob_hoax,
            row.prob_fakta,
            row.final_label_threshold,
            row.inference_time_ms,
            row.user_id,
        ],
    )
    .with_context(|| format!("Failed to insert history {}", row.history_id))?;
    Ok(())
}

const SELECT_COLUMNS: &str = "SELECT history_id, original_input, input_type, processed_text,
        predicted_label, prob_hoax, prob_fakta, final_label_threshold,
        inference_time_ms, user_id, created_at
     FROM history";

fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<HistoryRecord> {
    Ok(HistoryRecord {
        history_id: row.get(0)?,
        original_input: row.get(1)?,
        input_type: row.get(2)?,
        processed_text: row.get(3)?,
        predicted_label: row.get(4)?,
        prob_hoax: row.get(5)?,
        prob_fakta: row.get(6)?,
        final_label_threshold: row.get(7)?,
        inference_time_ms: row.get(8)?,
        user_id: row.get(9)?,
        created_at: row.get(10)?,
    })
}

/// Newest first. Ties on created_at (same second) fall back to insertion order.
pub fn recent_history(
    conn: &Connection,
    user_id: Option<&str>,
    limit: u32,
) -> Result<Vec<HistoryRecord>> {
    let records = match user_id {
        Some(user) => {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_COLUMNS} WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC LIMIT ?2"
            ))?;
            let rows = stmt.query_map(params![user, limit], map_row)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        }
        None => {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_COLUMNS} ORDER BY created_at DESC, rowid DESC LIMIT ?1"
            ))?;
            let rows = stmt.query_map(params![limit], map_row)?;
            rows.collect::<rusqlite::Result<Vec<_>>>()?
        }
    };
    Ok(records)
}

pub fn delete_history(conn: &Connection, user_id: Option<&str>, history_id: &str) -> Result<bool> {
    let deleted = match user_id {
        Some(user) => conn.execute(
            "DELETE FROM history WHERE history_id = ?1 AND user_id = ?2",
            params![history_id, user],
        )?,
        None => conn.execute("DELETE FROM history WHERE history_id = ?1", params![history_id])?,
    };
    Ok(deleted > 0)
}

pub fn history_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;

    fn row<'a>(id: &'a str, user: Option<&'a str>) -> NewHistoryRow<'a> {
        NewHistoryRow {
            history_id: id,
            original_input: "https://contoh.com/berita",
            input_type: "url",
            processed_text: "Judul berita isi berita",
            predicted_label: "HOAX",
            prob_hoax: 0.93,
            prob_fakta: 0.07,
            final_label_threshold: "HOAX",
            inference_time_ms: 41.5,
            user_id: user,
        }
    }

    #[test]
    fn test_insert_and_read_back() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        insert_history(&conn, &row("a", Some("u1"))).unwrap();

        let records = recent_history(&conn, Some("u1"), 5).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.history_id, "a");
        assert_eq!(r.input_type, "url");
        assert_eq!(r.final_label_threshold, "HOAX");
        assert!((r.prob_hoax - 0.93).abs() < 1e-10);
        assert_eq!(r.user_id.as_deref(), Some("u1"));
        assert!(!r.created_at.is_empty());
    }

    #[test]
    fn test_recent_filters_by_user_and_orders_newest_first() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        insert_history(&conn, &row("first", Some("u1"))).unwrap();
        insert_history(&conn, &row("other", Some("u2"))).unwrap();
        insert_history(&conn, &row("second", Some("u1"))).unwrap();

        let ids: Vec<_> = recent_history(&conn, Some("u1"), 5)
            .unwrap()
            .into_iter()
            .map(|r| r.history_id)
            .collect();
        assert_eq!(ids, vec!["second", "first"]);

        assert_eq!(recent_history(&conn, None, 5).unwrap().len(), 3);
        assert_eq!(recent_history(&conn, None, 1).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_only_matches_owner() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        insert_history(&conn, &row("h1", Some("u1"))).unwrap();

        assert!(!delete_history(&conn, Some("u2"), "h1").unwrap());
        assert!(delete_history(&conn, Some("u1"), "h1").unwrap());
        assert!(!delete_history(&conn, None, "h1").unwrap());
        assert_eq!(history_count(&conn).unwrap(), 0);
    }

    #[test]
    fn test_duplicate_id_is_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        insert_history(&conn, &row("dup", None)).unwrap();
        assert!(insert_history(&conn, &row("dup", None)).is_err());
        assert_eq!(history_count(&conn).unwrap(), 1);
    }
}
