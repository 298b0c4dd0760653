//! A shared test helper to spawn the Axum app on an ephemeral port.

use axum::{serve, Router};
use tokio::net::TcpListener as TokioTcpListener;

use axum_api_starter::config::state::AppState;
use axum_api_starter::core::server::router_with_state;

/// Spawns the app on a random unused port and returns its base URL.
/// The database pool is deliberately left uninitialized: nothing here
/// requires a running PostgreSQL instance.
pub fn spawn_app() -> String {
    let state: AppState = AppState::new().expect("Failed to build app state");

    // * Build the application with the same layers as the server binary.
    let app: Router = router_with_state(state);

    // * Bind an ephemeral port using std::net::TcpListener.
    let std_listener: std::net::TcpListener =
        std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    std_listener.set_nonblocking(true).unwrap();

    // * Convert std::net::TcpListener to tokio::net::TcpListener.
    let tokio_listener: TokioTcpListener =
        TokioTcpListener::from_std(std_listener).expect("Failed to convert to tokio listener");

    let addr: std::net::SocketAddr = tokio_listener.local_addr().unwrap();

    // * Spawn the server in a background task.
    tokio::spawn(async move {
        serve(tokio_listener, app).await.expect("Server failed");
    });

    // * Return the base URL, e.g. "http://127.0.0.1:12345".
    format!("http://{}", addr)
}
