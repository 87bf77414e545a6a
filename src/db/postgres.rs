// PgHistoryStore: PostgreSQL backend for the HistoryStore trait.
//
// Uses a sqlx PgPool with runtime parameter binding (no compile-time
// macros, so DATABASE_URL is not needed at build time).
//
// Differences from SQLite:
// - history_id is a native UUID
// - TIMESTAMPTZ instead of TEXT for created_at
// - DOUBLE PRECISION for probabilities and timings

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx_core::pool::Pool;
use sqlx_core::row::Row;
use sqlx_postgres::Postgres;
use uuid::Uuid;

use super::models::{HistoryRecord, NewHistoryRow};
use super::traits::HistoryStore;
use crate::pipeline::models::VerificationResult;

pub type PgPool = Pool<Postgres>;

pub struct PgHistoryStore {
    pool: PgPool,
}

impl PgHistoryStore {
    /// Connect and run pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url)
            .await
            .context("Failed to connect to PostgreSQL")?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Apply migrations under a session-level advisory lock so two instances
    /// starting together don't race. Lock and unlock must run on the same
    /// connection, so one is held for the whole sequence; the unlock runs
    /// even when a migration fails.
    async fn run_migrations(&self) -> Result<()> {
        // ASCII "CEKVIRAL" as a big-endian i64.
        const MIGRATION_LOCK_KEY: i64 = 0x43454B564952414C_u64 as i64;

        let mut lock_conn = self
            .pool
            .acquire()
            .await
            .context("Failed to acquire connection for migration advisory lock")?;

        sqlx_core::query::query("SELECT pg_advisory_lock($1)")
            .bind(MIGRATION_LOCK_KEY)
            .execute(&mut *lock_conn)
            .await
            .context("Failed to acquire migration advisory lock")?;

        let migration_result: Result<()> = async {
            sqlx_core::query::query(
                "CREATE TABLE IF NOT EXISTS schema_version (
                    version INTEGER PRIMARY KEY,
                    applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )",
            )
            .execute(&self.pool)
            .await?;

            let migrations = [(1, include_str!("../../migrations/postgres/0001_history.sql"))];

            for (version, sql) in migrations {
                let applied: bool = sqlx_core::query::query(
                    "SELECT COUNT(*) > 0 FROM schema_version WHERE version = $1",
                )
                .bind(version)
                .fetch_one(&self.pool)
                .await
                .map(|row| row.get::<bool, _>(0))
                .unwrap_or(false);

                if !applied {
                    let mut tx = self.pool.begin().await?;
                    sqlx_core::raw_sql::raw_sql(sql).execute(&mut *tx).await?;
                    sqlx_core::query::query("INSERT INTO schema_version (version) VALUES ($1)")
                        .bind(version)
                        .execute(&mut *tx)
                        .await?;
                    tx.commit().await?;
                }
            }
            Ok(())
        }
        .await;

        let unlock_result = sqlx_core::query::query("SELECT pg_advisory_unlock($1)")
            .bind(MIGRATION_LOCK_KEY)
            .execute(&mut *lock_conn)
            .await
            .context("Failed to release migration advisory lock");

        migration_result.context("PostgreSQL migration failed")?;
        unlock_result?;
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for PgHistoryStore {
    async fn save(&self, id: &str, result: &VerificationResult, user_id: Option<&str>) -> Result<()> {
        let row = NewHistoryRow::from_result(id, result, user_id);
        let history_id = Uuid::parse_str(row.history_id).context("history id is not a UUID")?;

        sqlx_core::query::query(
            "INSERT INTO history (history_id, original_input, input_type, processed_text,
                predicted_label, prob_hoax, prob_fakta, final_label_threshold,
                inference_time_ms, user_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(history_id)
        .bind(row.original_input)
        .bind(row.input_type)
        .bind(row.processed_text)
        .bind(row.predicted_label)
        .bind(row.prob_hoax)
        .bind(row.prob_fakta)
        .bind(row.final_label_threshold)
        .bind(row.inference_time_ms)
        .bind(row.user_id)
        .execute(&self.pool)
        .await
        .context("Failed to insert history")?;
        Ok(())
    }

    async fn recent(&self, user_id: Option<&str>, limit: u32) -> Result<Vec<HistoryRecord>> {
        // sqlx binds integers as i32 here; anything above is effectively unlimited.
        let limit = limit.min(i32::MAX as u32) as i32;
        let rows = sqlx_core::query::query(
            "SELECT history_id::text, original_input, input_type, processed_text,
                    predicted_label, prob_hoax, prob_fakta, final_label_threshold,
                    inference_time_ms, user_id,
                    to_char(created_at, 'YYYY-MM-DD HH24:MI:SS') AS created_at
             FROM history
             WHERE ($1::text IS NULL OR user_id = $1)
             ORDER BY history.created_at DESC
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            records.push(HistoryRecord {
                history_id: row.get(0),
                original_input: row.get(1),
                input_type: row.get(2),
                processed_text: row.get(3),
                predicted_label: row.get(4),
                prob_hoax: row.get(5),
                prob_fakta: row.get(6),
                final_label_threshold: row.get(7),
                inference_time_ms: row.get(8),
                user_id: row.get(9),
                created_at: row.get(10),
            });
        }
        Ok(records)
    }

    async fn delete(&self, user_id: Option<&str>, history_id: &str) -> Result<bool> {
        // Ids that aren't UUIDs can't exist in this table.
        let Ok(history_id) = Uuid::parse_str(history_id) else {
            return Ok(false);
        };
        let result = sqlx_core::query::query(
            "DELETE FROM history WHERE history_id = $1 AND ($2::text IS NULL OR user_id = $2)",
        )
        .bind(history_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .context("Failed to delete history")?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64> {
        let row = sqlx_core::query::query("SELECT COUNT(*) FROM history")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get(0))
    }
}
