//! SQLite database layer (embedded, no external dependencies)

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::types::{Task, User};

/// Fields of a task that a partial update may overwrite.
///
/// `None` means "not supplied, keep the existing value".
#[derive(Debug, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub is_done: Option<bool>,
    pub due_date: Option<NaiveDate>,
}

pub struct Database {
    pool: Arc<SqlitePool>,
}

impl Database {
    pub async fn new(database_path: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = std::path::Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        tracing::info!("SQLite connection established, running migrations...");

        Self::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tasks (
                task_id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                is_done BOOLEAN NOT NULL DEFAULT 0,
                due_date DATE,
                create_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                update_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    // Task operations

    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let tasks: Vec<Task> = sqlx::query_as(
            r#"
            SELECT task_id, title, is_done, due_date, create_at, update_at
            FROM tasks
            ORDER BY task_id
            "#,
        )
        .fetch_all(&*self.pool)
        .await?;

        Ok(tasks)
    }

    pub async fn get_task(&self, task_id: i64) -> Result<Option<Task>> {
        let task: Option<Task> = sqlx::query_as(
            r#"
            SELECT task_id, title, is_done, due_date, create_at, update_at
            FROM tasks WHERE task_id = ?1
            "#,
        )
        .bind(task_id)
        .fetch_optional(&*self.pool)
        .await?;

        Ok(task)
    }

    pub async fn create_task(&self, title: &str, due_date: NaiveDate) -> Result<Task> {
        let result = sqlx::query(
            r#"
            INSERT INTO tasks (title, due_date)
            VALUES (?1, ?2)
            "#,
        )
        .bind(title)
        .bind(due_date)
        .execute(&*self.pool)
        .await?;

        // Re-fetch so DB-assigned defaults and timestamps come back
        let task_id = result.last_insert_rowid();
        self.get_task(task_id)
            .await?
            .context("Created task row disappeared before read-back")
    }

    /// Overwrites only the fields supplied in `patch`; returns `None`
    /// when no row exists for `task_id`.
    pub async fn update_task(&self, task_id: i64, patch: TaskPatch) -> Result<Option<Task>> {
        let existing = match self.get_task(task_id).await? {
            Some(task) => task,
            None => return Ok(None),
        };

        let title = patch.title.unwrap_or(existing.title);
        let is_done = patch.is_done.unwrap_or(existing.is_done);
        let due_date = patch.due_date.or(existing.due_date);

        sqlx::query(
            r#"
            UPDATE tasks SET title = ?1, is_done = ?2, due_date = ?3, update_at = datetime('now')
            WHERE task_id = ?4
            "#,
        )
        .bind(&title)
        .bind(is_done)
        .bind(due_date)
        .bind(task_id)
        .execute(&*self.pool)
        .await?;

        self.get_task(task_id).await
    }

    /// Removes the row and returns its last-known values, or `None`
    /// when no row exists for `task_id`.
    pub async fn delete_task(&self, task_id: i64) -> Result<Option<Task>> {
        let existing = match self.get_task(task_id).await? {
            Some(task) => task,
            None => return Ok(None),
        };

        sqlx::query(
            r#"
            DELETE FROM tasks WHERE task_id = ?1
            "#,
        )
        .bind(task_id)
        .execute(&*self.pool)
        .await?;

        Ok(Some(existing))
    }

    // User operations

    pub async fn create_user(&self, username: &str) -> Result<User> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (username)
            VALUES (?1)
            "#,
        )
        .bind(username)
        .execute(&*self.pool)
        .await?;

        Ok(User {
            id: result.last_insert_rowid(),
            username: username.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> (Database, tempfile::TempDir) {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("test.db");
        let db = Database::new(path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn test_task_crud() {
        let (db, _dir) = test_db().await;

        let due = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let task = db.create_task("Buy milk", due).await.unwrap();
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.due_date, Some(due));
        assert!(!task.is_done);

        let fetched = db.get_task(task.task_id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Buy milk");

        assert!(db.get_task(task.task_id + 100).await.unwrap().is_none());

        let deleted = db.delete_task(task.task_id).await.unwrap().unwrap();
        assert_eq!(deleted.task_id, task.task_id);
        assert!(db.list_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_patch_merges_fields() {
        let (db, _dir) = test_db().await;

        let due = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let task = db.create_task("Write report", due).await.unwrap();

        let patch = TaskPatch {
            is_done: Some(true),
            ..Default::default()
        };
        let updated = db.update_task(task.task_id, patch).await.unwrap().unwrap();
        assert!(updated.is_done);
        assert_eq!(updated.title, "Write report");
        assert_eq!(updated.due_date, Some(due));

        // Unknown id leaves nothing to patch
        let missing = db.update_task(9999, TaskPatch::default()).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_create_user_assigns_ids() {
        let (db, _dir) = test_db().await;

        let a = db.create_user("alice").await.unwrap();
        let b = db.create_user("bob").await.unwrap();
        assert_eq!(a.username, "alice");
        assert!(b.id > a.id);
    }
}
