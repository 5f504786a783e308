//! User repository trait

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::User;
use crate::errors::DomainResult;

/// Persistence operations for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by normalized phone number
    async fn find_by_phone(&self, phone: &str) -> DomainResult<Option<User>>;

    /// Find a user by email address
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Find a user by id
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>>;

    /// Persist a new user
    async fn create(&self, user: User) -> DomainResult<User>;

    /// Persist changes to an existing user
    async fn update(&self, user: User) -> DomainResult<User>;

    /// Whether an account already exists for this phone number
    async fn exists_by_phone(&self, phone: &str) -> DomainResult<bool>;
}
