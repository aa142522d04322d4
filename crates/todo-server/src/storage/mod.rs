//! Storage layer
//!
//! Uses SQLite (embedded, single file) via a sqlx connection pool.

pub mod db;

pub use db::{Database, TaskPatch};
