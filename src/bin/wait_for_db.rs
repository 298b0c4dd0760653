// Database readiness probe used as the first startup step. Exits 0 once
// PostgreSQL answers a trivial query, 1 when the attempts are exhausted.

use std::time::Duration;

use anyhow::Result;
use sqlx::{ConnectOptions, Connection, PgConnection};
use tracing::{error, info, warn};

use axum_api_starter::config::environment::EnvironmentVariables;
use axum_api_starter::core::logging;
use axum_api_starter::database::connect_options;

const MAX_ATTEMPTS: u32 = 30;
const RETRY_DELAY: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() {
    logging::init_tracing();

    let env: &EnvironmentVariables = EnvironmentVariables::instance();

    for attempt in 1..=MAX_ATTEMPTS {
        match try_connect(env).await {
            Ok(()) => {
                info!("Database is ready (attempt {attempt})");
                return;
            }
            Err(e) => {
                warn!("Database not ready yet (attempt {attempt}/{MAX_ATTEMPTS}): {e:#}");
            }
        }

        tokio::time::sleep(RETRY_DELAY).await;
    }

    error!("Database did not become ready after {MAX_ATTEMPTS} attempts");
    std::process::exit(1);
}

async fn try_connect(env: &EnvironmentVariables) -> Result<()> {
    let mut conn: PgConnection = connect_options(env).connect().await?;

    sqlx::query("SELECT 1").execute(&mut conn).await?;
    conn.close().await?;

    Ok(())
}
