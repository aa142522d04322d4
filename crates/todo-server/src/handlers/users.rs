//! User handlers

use crate::handlers::ApiError;
use crate::types::User;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
}

pub async fn create(
    State(state): State<AppState>,
    Json(req_body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.db.create_user(&req_body.username).await?;
    Ok((StatusCode::CREATED, Json(user)))
}
