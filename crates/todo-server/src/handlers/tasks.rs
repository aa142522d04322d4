//! Task handlers

use crate::handlers::ApiError;
use crate::storage::TaskPatch;
use crate::types::Task;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub due_date: NaiveDate,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub is_done: Option<bool>,
    pub due_date: Option<NaiveDate>,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state.db.list_tasks().await?;
    Ok(Json(tasks))
}

pub async fn get(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> Result<Json<Task>, ApiError> {
    let task = state
        .db
        .get_task(task_id)
        .await?
        .ok_or(ApiError::NotFound(task_id))?;
    Ok(Json(task))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req_body): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = state
        .db
        .create_task(&req_body.title, req_body.due_date)
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    Json(req_body): Json<UpdateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let patch = TaskPatch {
        title: req_body.title,
        is_done: req_body.is_done,
        due_date: req_body.due_date,
    };

    let task = state
        .db
        .update_task(task_id, patch)
        .await?
        .ok_or(ApiError::NotFound(task_id))?;
    Ok((StatusCode::ACCEPTED, Json(task)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
) -> Result<Json<Task>, ApiError> {
    let task = state
        .db
        .delete_task(task_id)
        .await?
        .ok_or(ApiError::NotFound(task_id))?;
    Ok(Json(task))
}
