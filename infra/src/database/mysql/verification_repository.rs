//! MySQL implementation of the verification repository.
//!
//! Expiry is enforced in the queries themselves: every lookup compares
//! `expires_at` against the caller's clock reading, so a record that a sweep
//! has not yet removed still never matches once expired.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use cc_core::domain::entities::{VerificationPurpose, VerificationRecord};
use cc_core::errors::{DomainError, DomainResult};
use cc_core::repositories::VerificationRepository;

/// MySQL-backed [`VerificationRepository`]
pub struct MySqlVerificationRepository {
    pool: MySqlPool,
}

impl MySqlVerificationRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> DomainResult<VerificationRecord> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Database(format!("failed to read id: {}", e)))?;
        let purpose: String = row
            .try_get("purpose")
            .map_err(|e| DomainError::Database(format!("failed to read purpose: {}", e)))?;
        let user_id: Option<String> = row
            .try_get("user_id")
            .map_err(|e| DomainError::Database(format!("failed to read user_id: {}", e)))?;

        Ok(VerificationRecord {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Database(format!("invalid record id: {}", e)))?,
            purpose: purpose
                .parse()
                .map_err(|_| DomainError::Database(format!("unknown purpose: {}", purpose)))?,
            target: row
                .try_get("target")
                .map_err(|e| DomainError::Database(format!("failed to read target: {}", e)))?,
            code: row
                .try_get("code")
                .map_err(|e| DomainError::Database(format!("failed to read code: {}", e)))?,
            user_id: user_id
                .map(|v| Uuid::parse_str(&v))
                .transpose()
                .map_err(|e| DomainError::Database(format!("invalid user id: {}", e)))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database(format!("failed to read created_at: {}", e)))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Database(format!("failed to read expires_at: {}", e)))?,
        })
    }
}

#[async_trait]
impl VerificationRepository for MySqlVerificationRepository {
    async fn create(&self, record: VerificationRecord) -> DomainResult<()> {
        sqlx::query(
            r#"
            INSERT INTO verification_records
                (id, purpose, target, code, user_id, created_at, expires_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.id.to_string())
        .bind(record.purpose.as_str())
        .bind(&record.target)
        .bind(&record.code)
        .bind(record.user_id.map(|id| id.to_string()))
        .bind(record.created_at)
        .bind(record.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Database(format!("insert failed: {}", e)))?;
        Ok(())
    }

    async fn find_active_by_code(
        &self,
        purpose: VerificationPurpose,
        code: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<VerificationRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, purpose, target, code, user_id, created_at, expires_at
            FROM verification_records
            WHERE purpose = ? AND code = ? AND expires_at >= ?
            "#,
        )
        .bind(purpose.as_str())
        .bind(code)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Database(format!("query failed: {}", e)))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn find_for_redeem(
        &self,
        purpose: VerificationPurpose,
        code: &str,
        target: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<VerificationRecord>> {
        let row = match target {
            Some(target) => {
                sqlx::query(
                    r#"
                    SELECT id, purpose, target, code, user_id, created_at, expires_at
                    FROM verification_records
                    WHERE purpose = ? AND code = ? AND target = ? AND expires_at >= ?
                    "#,
                )
                .bind(purpose.as_str())
                .bind(code)
                .bind(target)
                .bind(now)
                .fetch_optional(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT id, purpose, target, code, user_id, created_at, expires_at
                    FROM verification_records
                    WHERE purpose = ? AND code = ? AND expires_at >= ?
                    "#,
                )
                .bind(purpose.as_str())
                .bind(code)
                .bind(now)
                .fetch_optional(&self.pool)
                .await
            }
        }
        .map_err(|e| DomainError::Database(format!("query failed: {}", e)))?;

        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let result = sqlx::query("DELETE FROM verification_records WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("delete failed: {}", e)))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_for_target(
        &self,
        purpose: VerificationPurpose,
        target: &str,
    ) -> DomainResult<u64> {
        let result =
            sqlx::query("DELETE FROM verification_records WHERE purpose = ? AND target = ?")
                .bind(purpose.as_str())
                .bind(target)
                .execute(&self.pool)
                .await
                .map_err(|e| DomainError::Database(format!("delete failed: {}", e)))?;
        Ok(result.rows_affected())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> DomainResult<u64> {
        let result = sqlx::query("DELETE FROM verification_records WHERE expires_at < ?")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("delete failed: {}", e)))?;
        Ok(result.rows_affected())
    }
}
