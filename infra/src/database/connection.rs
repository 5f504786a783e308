//! Database connection pool management

use std::time::Duration;

use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;
use tracing::info;

use cc_shared::config::DatabaseConfig;

use crate::InfrastructureError;

/// MySQL connection pool wrapper
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Create a new connection pool from configuration
    pub async fn new(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        info!(
            max_connections = config.max_connections,
            "creating database connection pool"
        );

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(&config.url)
            .await
            .map_err(|e| InfrastructureError::Database(format!("connection failed: {}", e)))?;

        Ok(Self { pool })
    }

    /// The underlying SQLx pool
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Verify the pool can reach the database
    pub async fn health_check(&self) -> Result<(), InfrastructureError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| InfrastructureError::Database(format!("health check failed: {}", e)))
    }
}
