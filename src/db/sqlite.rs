// SqliteHistoryStore: rusqlite backend for the HistoryStore trait.
//
// Connection is !Sync, so it sits behind tokio::sync::Mutex. Methods lock,
// do synchronous rusqlite work, and return without awaiting in between.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::{HistoryRecord, NewHistoryRow};
use super::traits::HistoryStore;
use crate::pipeline::models::VerificationResult;

pub struct SqliteHistoryStore {
    conn: Mutex<Connection>,
}

impl SqliteHistoryStore {
    /// Wrap an already-opened connection whose schema is in place.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }
}

#[async_trait]
impl HistoryStore for SqliteHistoryStore {
    async fn save(&self, id: &str, result: &VerificationResult, user_id: Option<&str>) -> Result<()> {
        let row = NewHistoryRow::from_result(id, result, user_id);
        let conn = self.conn.lock().await;
        super::queries::insert_history(&conn, &row)
    }

    async fn recent(&self, user_id: Option<&str>, limit: u32) -> Result<Vec<HistoryRecord>> {
        let conn = self.conn.lock().await;
        super::queries::recent_history(&conn, user_id, limit)
    }

    async fn delete(&self, user_id: Option<&str>, history_id: &str) -> Result<bool> {
        let conn = self.conn.lock().await;
        super::queries::delete_history(&conn, user_id, history_id)
    }

    async fn count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::history_count(&conn)
    }
}
