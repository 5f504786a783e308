//! MySQL implementation of the user repository.
//!
//! User ids are stored as 36-character UUID strings and timestamps as UTC
//! datetimes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use cc_core::domain::entities::User;
use cc_core::errors::{DomainError, DomainResult};
use cc_core::repositories::UserRepository;

/// MySQL-backed [`UserRepository`]
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> DomainResult<User> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Database(format!("failed to read id: {}", e)))?;

        Ok(User {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Database(format!("invalid user id: {}", e)))?,
            name: row
                .try_get("name")
                .map_err(|e| DomainError::Database(format!("failed to read name: {}", e)))?,
            phone: row
                .try_get("phone")
                .map_err(|e| DomainError::Database(format!("failed to read phone: {}", e)))?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::Database(format!("failed to read email: {}", e)))?,
            password_hash: row.try_get("password_hash").map_err(|e| {
                DomainError::Database(format!("failed to read password_hash: {}", e))
            })?,
            phone_verified: row.try_get("phone_verified").map_err(|e| {
                DomainError::Database(format!("failed to read phone_verified: {}", e))
            })?,
            email_verified: row.try_get("email_verified").map_err(|e| {
                DomainError::Database(format!("failed to read email_verified: {}", e))
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database(format!("failed to read created_at: {}", e)))?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Database(format!("failed to read updated_at: {}", e)))?,
            last_login_at: row.try_get("last_login_at").map_err(|e| {
                DomainError::Database(format!("failed to read last_login_at: {}", e))
            })?,
        })
    }

    async fn find_by_column(&self, query: &str, value: &str) -> DomainResult<Option<User>> {
        let row = sqlx::query(query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("query failed: {}", e)))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }
}

const USER_COLUMNS: &str = "id, name, phone, email, password_hash, phone_verified, \
                            email_verified, created_at, updated_at, last_login_at";

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_phone(&self, phone: &str) -> DomainResult<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE phone = ?", USER_COLUMNS);
        self.find_by_column(&query, phone).await
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS);
        self.find_by_column(&query, email).await
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
        self.find_by_column(&query, &id.to_string()).await
    }

    async fn create(&self, user: User) -> DomainResult<User> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, phone, email, password_hash,
                               phone_verified, email_verified,
                               created_at, updated_at, last_login_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(&user.phone)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.phone_verified)
        .bind(user.email_verified)
        .bind(user.created_at)
        .bind(user.updated_at)
        .bind(user.last_login_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            // The unique index on phone surfaces as a conflict, not a 500
            sqlx::Error::Database(ref db) if db.is_unique_violation() => DomainError::Conflict {
                message: "phone number already registered".to_string(),
            },
            other => DomainError::Database(format!("insert failed: {}", other)),
        })?;

        Ok(user)
    }

    async fn update(&self, user: User) -> DomainResult<User> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = ?, phone = ?, email = ?, password_hash = ?,
                phone_verified = ?, email_verified = ?,
                updated_at = ?, last_login_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&user.name)
        .bind(&user.phone)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.phone_verified)
        .bind(user.email_verified)
        .bind(user.updated_at)
        .bind(user.last_login_at)
        .bind(user.id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::Database(format!("update failed: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }
        Ok(user)
    }

    async fn exists_by_phone(&self, phone: &str) -> DomainResult<bool> {
        let row = sqlx::query("SELECT 1 FROM users WHERE phone = ? LIMIT 1")
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database(format!("query failed: {}", e)))?;
        Ok(row.is_some())
    }
}
