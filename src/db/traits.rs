// History store trait: backend-agnostic persistence for verification results.
//
// Implementors: SqliteHistoryStore (rusqlite), PgHistoryStore (sqlx),
// NoopHistoryStore. Ids are allocated up front so the orchestrator can
// return one to the caller while the write runs in the background.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use super::models::HistoryRecord;
use crate::pipeline::models::VerificationResult;

#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Reserve an id for a result about to be saved. `None` means this store
    /// does not persist anything.
    fn allocate_id(&self) -> Option<String> {
        Some(Uuid::new_v4().to_string())
    }

    /// Save a result under a previously allocated id.
    async fn save(&self, id: &str, result: &VerificationResult, user_id: Option<&str>)
        -> Result<()>;

    /// Most recent results first. `None` lists every user's results.
    async fn recent(&self, user_id: Option<&str>, limit: u32) -> Result<Vec<HistoryRecord>>;

    /// Delete one entry. With a user id, only that user's entry matches.
    /// Returns whether anything was removed.
    async fn delete(&self, user_id: Option<&str>, history_id: &str) -> Result<bool>;

    async fn count(&self) -> Result<i64>;
}

/// Store used when no database is configured. Nothing is saved, so every
/// result comes back as "unsaved".
pub struct NoopHistoryStore;

#[async_trait]
impl HistoryStore for NoopHistoryStore {
    fn allocate_id(&self) -> Option<String> {
        None
    }

    async fn save(&self, _id: &str, _result: &VerificationResult, _user_id: Option<&str>) -> Result<()> {
        Ok(())
    }

    async fn recent(&self, _user_id: Option<&str>, _limit: u32) -> Result<Vec<HistoryRecord>> {
        Ok(Vec::new())
    }

    async fn delete(&self, _user_id: Option<&str>, _history_id: &str) -> Result<bool> {
        Ok(false)
    }

    async fn count(&self) -> Result<i64> {
        Ok(0)
    }
}
