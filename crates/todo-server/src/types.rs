//! Entity types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A task row as stored in the `tasks` table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    pub task_id: i64,
    pub title: String,
    pub is_done: bool,
    pub due_date: Option<NaiveDate>,
    pub create_at: DateTime<Utc>,
    pub update_at: DateTime<Utc>,
}

/// A user row as stored in the `users` table
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
}
