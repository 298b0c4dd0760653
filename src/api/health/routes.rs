// Health route definitions

use axum::{routing::get, Router};

use super::handler;
use crate::config::state::AppState;

/// Creates router with the health endpoints
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handler::health))
        .route("/health/db", get(handler::db_health))
}
