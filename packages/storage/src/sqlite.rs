// ABOUTME: SQLite pool construction and schema migrations
// ABOUTME: Applies connection pragmas from StorageConfig and runs embedded migrations

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteSynchronous,
};
use tracing::{debug, info};

use crate::{StorageConfig, StorageError, StorageResult};

/// Open a connection pool for the configured database file and bring its
/// schema up to date. The file and its parent directory are created if missing.
pub async fn open_pool(config: &StorageConfig) -> StorageResult<SqlitePool> {
    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
        }
    }

    let journal_mode = if config.enable_wal {
        SqliteJournalMode::Wal
    } else {
        SqliteJournalMode::Delete
    };

    // Pragmas go on the connect options so every pooled connection gets them.
    let options = SqliteConnectOptions::new()
        .filename(&config.database_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(journal_mode)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(config.busy_timeout_seconds));

    debug!("Opening database at: {}", config.database_path.display());

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.busy_timeout_seconds))
        .connect_with(options)
        .await
        .map_err(StorageError::Sqlx)?;

    run_migrations(&pool).await?;

    info!(
        "Database ready at {} (max connections: {})",
        config.database_path.display(),
        config.max_connections
    );
    Ok(pool)
}

/// Open a single-connection in-memory database with the schema applied.
///
/// The pool never recycles its connection, since the database lives only as
/// long as that connection does.
pub async fn open_in_memory() -> StorageResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .map_err(StorageError::Sqlx)?
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map_err(StorageError::Sqlx)?;

    run_migrations(&pool).await?;
    Ok(pool)
}

/// Run the embedded schema migrations.
pub async fn run_migrations(pool: &SqlitePool) -> StorageResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    debug!("Schema migrations applied");
    Ok(())
}
