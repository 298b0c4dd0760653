// Application state management with singleton pattern

use std::sync::Arc;
use once_cell::sync::Lazy;

use crate::auth::authz::AuthzEngine;
use crate::config::environment::EnvironmentVariables;
use crate::database::DatabaseService;

// AppState singleton
#[derive(Debug, Clone)]
pub struct AppState {
    pub environment: Arc<EnvironmentVariables>,
    pub database: DatabaseService,
    pub authz: Arc<AuthzEngine>,
}

impl AppState {
    /// Creates a new AppState instance
    pub fn new() -> anyhow::Result<Self> {
        let environment: EnvironmentVariables = EnvironmentVariables::load()?;
        let environment_arc: Arc<EnvironmentVariables> = Arc::new(environment);

        let database: DatabaseService = DatabaseService::new(environment_arc.clone());
        let authz: Arc<AuthzEngine> = Arc::new(AuthzEngine::new());

        Ok(Self {
            environment: environment_arc,
            database,
            authz,
        })
    }

    /// Returns the singleton instance
    pub fn instance() -> &'static Self {
        static INSTANCE: Lazy<AppState> = Lazy::new(|| {
            AppState::new().expect("Failed to initialize AppState")
        });
        &INSTANCE
    }

    /// Brings up the services that need an async initialization step.
    pub async fn initialize() -> anyhow::Result<()> {
        let instance: &'static AppState = Self::instance();

        instance.database.initialize().await?;

        tracing::info!("Services initialized successfully");
        Ok(())
    }

    /// Gracefully shutdown all database connections
    pub async fn shutdown() {
        let instance: &'static AppState = Self::instance();
        instance.database.shutdown().await;
    }
}
