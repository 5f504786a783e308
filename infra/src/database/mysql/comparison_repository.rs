//! MySQL implementation of the comparison-count provider

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use cc_core::errors::{DomainError, DomainResult};
use cc_core::repositories::ComparisonRepository;

/// MySQL-backed [`ComparisonRepository`]
pub struct MySqlComparisonRepository {
    pool: MySqlPool,
}

impl MySqlComparisonRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ComparisonRepository for MySqlComparisonRepository {
    async fn count_active(&self, user_id: Uuid) -> DomainResult<u32> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS count FROM comparison_lists WHERE user_id = ? AND active = TRUE",
        )
        .bind(user_id.to_string())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Database(format!("count query failed: {}", e)))?;

        let count: i64 = row
            .try_get("count")
            .map_err(|e| DomainError::Database(format!("failed to read count: {}", e)))?;
        Ok(count.max(0) as u32)
    }
}
