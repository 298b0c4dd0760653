// Health endpoints: liveness and database connectivity

use axum::{extract::State, http::StatusCode, Extension};
use serde_json::json;
use tracing::{info, instrument};

use crate::api::middleware::access::CurrentUser;
use crate::config::state::AppState;
use crate::utils::response_handler::HandlerResponse;

/// Liveness endpoint with version, environment and instance information.
/// Also reports the caller resolved by the authentication surface, which
/// stays `null` until a real implementation lands.
#[instrument(skip(state, current))]
pub async fn health(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> HandlerResponse {
    info!("Health endpoint called");

    HandlerResponse::new(StatusCode::OK)
        .data(json!({
            "version": env!("CARGO_PKG_VERSION"),
            "status": "healthy",
            "environment": state.environment.environment.as_ref(),
            "instance": instance_identifier(),
            "user": current.0,
        }))
        .message("API is running")
}

/// Verifies database connectivity with a round-trip query
#[instrument(skip(state))]
pub async fn db_health(State(state): State<AppState>) -> HandlerResponse {
    info!("Database health check called");

    match state.database.ping().await {
        Ok(()) => HandlerResponse::new(StatusCode::OK)
            .data(json!({ "database": "connected" }))
            .message("Database connection healthy"),
        Err(e) => HandlerResponse::new(StatusCode::SERVICE_UNAVAILABLE)
            .data(json!({ "database": "disconnected", "error": e.to_string() }))
            .message("Database connection failed"),
    }
}

/// Generate a unique identifier for this application instance
fn instance_identifier() -> String {
    if let Ok(hostname) = std::env::var("HOSTNAME") {
        return format!("host_{}", hostname);
    }

    if let Ok(hostname) = hostname::get() {
        if let Some(hostname_str) = hostname.to_str() {
            return format!("host_{}", hostname_str);
        }
    }

    // Last resort: process-unique ID
    format!("process_{}", std::process::id())
}
