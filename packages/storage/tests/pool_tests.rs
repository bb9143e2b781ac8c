// ABOUTME: Integration tests for SQLite pool setup
// ABOUTME: Verifies file creation, pragmas and the tag schema produced by migrations

use sqlx::Row;
use tempfile::TempDir;
use zen_storage::{open_in_memory, open_pool, run_migrations, StorageConfig};

fn file_config(dir: &TempDir) -> StorageConfig {
    StorageConfig {
        database_path: dir.path().join("nested").join("zen.db"),
        max_connections: 2,
        busy_timeout_seconds: 5,
        ..StorageConfig::default()
    }
}

#[tokio::test]
async fn test_open_pool_creates_database_file() {
    let dir = TempDir::new().unwrap();
    let config = file_config(&dir);

    let pool = open_pool(&config).await.unwrap();

    assert!(config.database_path.exists());

    let journal_mode: String = sqlx::query_scalar("PRAGMA journal_mode")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(journal_mode.to_lowercase(), "wal");

    let foreign_keys: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(foreign_keys, 1);
}

#[tokio::test]
async fn test_open_pool_without_wal() {
    let dir = TempDir::new().unwrap();
    let config = StorageConfig {
        enable_wal: false,
        ..file_config(&dir)
    };

    let pool = open_pool(&config).await.unwrap();

    let journal_mode: String = sqlx::query_scalar("PRAGMA journal_mode")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(journal_mode.to_lowercase(), "delete");
}

#[tokio::test]
async fn test_migrations_create_tag_tables() {
    let pool = open_in_memory().await.unwrap();

    let rows = sqlx::query("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .fetch_all(&pool)
        .await
        .unwrap();
    let tables: Vec<String> = rows.iter().map(|row| row.get("name")).collect();

    for table in ["focus_mode_tags", "focus_modes", "note_tags", "notes", "tags"] {
        assert!(
            tables.iter().any(|name| name == table),
            "missing table {}",
            table
        );
    }
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let pool = open_in_memory().await.unwrap();
    run_migrations(&pool).await.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tags")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_note_tags_reject_unknown_tag() {
    let pool = open_in_memory().await.unwrap();

    sqlx::query("INSERT INTO notes (note_id, title) VALUES (1, 'Groceries')")
        .execute(&pool)
        .await
        .unwrap();

    let result = sqlx::query("INSERT INTO note_tags (note_id, tag_id) VALUES (1, 99)")
        .execute(&pool)
        .await;
    assert!(result.is_err());
}
