use crate::db::schema::SQLITE_INIT;
use crate::error::PersistenceError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::info;

/// Open (creating if missing) the SQLite database and make sure the schema exists.
pub async fn connect(database_url: &str) -> Result<SqlitePool, PersistenceError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5))
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal);

    let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;

    apply_schema(&pool).await?;

    info!(database_url, "persons store initialized");
    Ok(pool)
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), PersistenceError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
