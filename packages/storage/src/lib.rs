// ABOUTME: Data layer foundation for Zen
// ABOUTME: Storage configuration, error types, SQLite pool setup and schema migrations

pub mod config;
pub mod sqlite;

use thiserror::Error;

pub use config::StorageConfig;
pub use sqlite::{open_in_memory, open_pool, run_migrations};

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

pub type StorageResult<T> = Result<T, StorageError>;
