// Verification history storage.
//
// SQLite (rusqlite, bundled) is the default backend; the database file lives
// wherever CEKVIRAL_DB_PATH points (./cekviral.db by default). Setting
// DATABASE_URL to a postgres:// URL selects PostgreSQL instead when built
// with the `postgres` feature.

pub mod models;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod queries;
#[cfg(feature = "sqlite")]
pub mod schema;
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgres")]
pub mod postgres;

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};

pub use models::HistoryRecord;
pub use traits::{HistoryStore, NoopHistoryStore};

use crate::config::Config;

/// Open (or create) the SQLite database and run migrations.
#[cfg(feature = "sqlite")]
pub fn initialize(db_path: &str) -> Result<rusqlite::Connection> {
    use anyhow::Context;
    use std::path::Path;

    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory for database: {}", db_path))?;
        }
    }

    let conn = rusqlite::Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path))?;

    conn.pragma_update(None, "journal_mode", "WAL")?;
    schema::create_tables(&conn)?;

    Ok(conn)
}

#[cfg(feature = "sqlite")]
pub fn open_sqlite(db_path: &str) -> Result<sqlite::SqliteHistoryStore> {
    Ok(sqlite::SqliteHistoryStore::new(initialize(db_path)?))
}

#[cfg(feature = "postgres")]
pub async fn connect_postgres(database_url: &str) -> Result<postgres::PgHistoryStore> {
    postgres::PgHistoryStore::connect(database_url).await
}

pub fn wants_postgres(config: &Config) -> bool {
    config
        .database_url
        .as_deref()
        .is_some_and(|url| url.starts_with("postgres://") || url.starts_with("postgresql://"))
}

/// Pick the history backend from configuration.
pub async fn open_store(config: &Config) -> Result<Arc<dyn HistoryStore>> {
    if wants_postgres(config) {
        #[cfg(feature = "postgres")]
        {
            if let Some(url) = config.database_url.as_deref() {
                let store = connect_postgres(url).await?;
                info!("Using PostgreSQL history store");
                return Ok(Arc::new(store));
            }
        }
        #[cfg(not(feature = "postgres"))]
        warn!("DATABASE_URL points at PostgreSQL but this build lacks the `postgres` feature");
    }

    #[cfg(feature = "sqlite")]
    {
        let store = open_sqlite(&config.db_path)?;
        info!(path = %config.db_path, "Using SQLite history store");
        return Ok(Arc::new(store));
    }

    #[allow(unreachable_code)]
    {
        warn!("No history backend compiled in; results will not be saved");
        Ok(Arc::new(NoopHistoryStore))
    }
}
