use anyhow::Result;
use axum::serve;

use axum_api_starter::config::state::AppState;
use axum_api_starter::core::{logging, server};

#[tokio::main]
async fn main() -> Result<()> {
    // set up logging
    logging::init_tracing();

    // bring up the connection pool before accepting traffic
    AppState::initialize().await?;

    let app: axum::Router = server::create_app();
    let listener: tokio::net::TcpListener = server::setup_listener().await?;

    tracing::info!("Server listening on: {}", listener.local_addr()?);

    serve(listener, app)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    Ok(())
}
