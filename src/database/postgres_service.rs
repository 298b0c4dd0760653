// =============================================================================
// DATABASE SERVICE - PostgreSQL connection pool
// =============================================================================

use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};
use tokio::sync::OnceCell;
use tracing::{debug, info, log::LevelFilter};

use crate::config::environment::EnvironmentVariables;

/// Database service managing a single PostgreSQL connection pool.
///
/// The schema itself is not owned here: migrations are applied by the
/// external `sqlx` CLI before the server starts.
#[derive(Clone, Debug)]
pub struct DatabaseService {
    /// Single connection pool for the application
    pool: Arc<OnceCell<PgPool>>,
    /// Environment configuration
    config: Arc<EnvironmentVariables>,
}

impl DatabaseService {
    /// Creates a new DatabaseService instance.
    /// Note: The pool is not initialized until `initialize()` is called.
    pub fn new(config: Arc<EnvironmentVariables>) -> Self {
        Self {
            pool: Arc::new(OnceCell::new()),
            config,
        }
    }

    /// Initializes the database service by creating the pool.
    pub async fn initialize(&self) -> Result<()> {
        info!("Initializing DatabaseService...");

        self.pool
            .get_or_try_init(|| async { self.create_pool().await })
            .await?;

        info!("DatabaseService initialized successfully");
        Ok(())
    }

    /// Returns the connection pool.
    /// Errors if the pool has not been initialized.
    pub fn get_pool(&self) -> Result<&PgPool> {
        self.pool
            .get()
            .ok_or_else(|| anyhow::anyhow!("Database pool not initialized"))
    }

    /// Round-trips a trivial query to verify connectivity.
    pub async fn ping(&self) -> Result<()> {
        let pool: &PgPool = self.get_pool()?;

        sqlx::query("SELECT 1")
            .execute(pool)
            .await
            .context("Database ping failed")?;

        Ok(())
    }

    /// Gracefully shuts down the service.
    pub async fn shutdown(&self) {
        info!("Initiating DatabaseService shutdown...");
        if let Some(pool) = self.pool.get() {
            pool.close().await;
            info!("Database connection pool closed");
        } else {
            debug!("Database pool was not initialized, nothing to close");
        }
    }

    /// Creates the connection pool based on environment config
    async fn create_pool(&self) -> Result<PgPool> {
        let pool: PgPool = PgPoolOptions::new()
            .max_connections(20)
            .min_connections(5)
            .idle_timeout(std::time::Duration::from_secs(30))
            .connect_with(connect_options(&self.config))
            .await
            .context("Failed to create database connection pool")?;

        Ok(pool)
    }
}

/// Connection options shared by the pool and the `wait_for_db` readiness
/// check. Always UTC; SSL is required outside development.
pub fn connect_options(config: &EnvironmentVariables) -> PgConnectOptions {
    let mut options: PgConnectOptions = PgConnectOptions::new()
        .host(&config.db_host)
        .port(config.db_port)
        .username(&config.db_user)
        .password(&config.db_password)
        .database(&config.db_name)
        .log_statements(LevelFilter::Debug);

    options = options.options([("timezone", "UTC"), ("application_name", "axum-api-starter")]);

    if config.is_production() {
        options = options.ssl_mode(sqlx::postgres::PgSslMode::Require);
    } else {
        options = options.ssl_mode(sqlx::postgres::PgSslMode::Prefer);
    }

    options
}
