//! Todo Server
//!
//! A minimal task/user management HTTP API over an embedded SQLite file.

pub mod handlers;
pub mod storage;
pub mod types;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use storage::Database;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

/// Builds the full router with CORS and request tracing layers applied.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/tasks/",
            get(handlers::tasks::list).post(handlers::tasks::create),
        )
        .route(
            "/tasks/:id",
            get(handlers::tasks::get)
                .put(handlers::tasks::update)
                .delete(handlers::tasks::delete),
        )
        .route("/users/", post(handlers::users::create))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
