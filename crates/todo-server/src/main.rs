//! Todo Server binary
//!
//! Loads configuration from the environment, opens the SQLite database,
//! and serves the HTTP API.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use todo_server::storage::Database;
use todo_server::{app, AppState};

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Todo Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = load_config();
    info!(
        "Config loaded: bind={}, db={}",
        config.bind_address, config.database_path
    );

    let db = Arc::new(
        Database::new(&config.database_path)
            .await
            .context("Failed to initialize database")?,
    );

    let state = AppState { db };
    let app = app(state);

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Server listening on {}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

#[derive(Debug, Clone)]
struct Config {
    bind_address: String,
    database_path: String,
}

fn load_config() -> Config {
    let database_path =
        std::env::var("DATABASE_PATH").unwrap_or_else(|_| "./todo.db".to_string());

    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8000".to_string());

    Config {
        bind_address,
        database_path,
    }
}
