//! In-memory user repository for tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::User;
use crate::errors::{DomainError, DomainResult};

use super::UserRepository;

/// In-memory [`UserRepository`] backed by a `HashMap`.
///
/// The store is exposed so tests can seed and inspect accounts directly.
#[derive(Default, Clone)]
pub struct MockUserRepository {
    pub users: Arc<Mutex<HashMap<Uuid, User>>>,
    /// When set, every call fails with an internal error
    pub fail: Arc<Mutex<bool>>,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn insert(&self, user: User) {
        self.users.lock().unwrap().insert(user.id, user);
    }

    fn check_fail(&self) -> DomainResult<()> {
        if *self.fail.lock().unwrap() {
            return Err(DomainError::Internal {
                message: "mock user repository failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_phone(&self, phone: &str) -> DomainResult<Option<User>> {
        self.check_fail()?;
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.phone == phone).cloned())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        self.check_fail()?;
        let users = self.users.lock().unwrap();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<User>> {
        self.check_fail()?;
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, user: User) -> DomainResult<User> {
        self.check_fail()?;
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.phone == user.phone) {
            return Err(DomainError::Conflict {
                message: "phone number already registered".to_string(),
            });
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> DomainResult<User> {
        self.check_fail()?;
        let mut users = self.users.lock().unwrap();
        if !users.contains_key(&user.id) {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn exists_by_phone(&self, phone: &str) -> DomainResult<bool> {
        self.check_fail()?;
        let users = self.users.lock().unwrap();
        Ok(users.values().any(|u| u.phone == phone))
    }
}
