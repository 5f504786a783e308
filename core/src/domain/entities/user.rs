//! User account entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Phone number in normalized form; unique across accounts
    pub phone: String,
    pub email: String,
    /// Bcrypt hash of the account password
    pub password_hash: String,
    pub phone_verified: bool,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new unverified account
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            phone_verified: false,
            email_verified: false,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    pub fn verify_phone(&mut self) {
        self.phone_verified = true;
        self.updated_at = Utc::now();
    }

    pub fn verify_email(&mut self) {
        self.email_verified = true;
        self.updated_at = Utc::now();
    }

    pub fn update_last_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// The externally visible view of this account
    pub fn sanitized(&self) -> PublicUser {
        PublicUser::from(self)
    }
}

/// User representation safe to return to callers.
///
/// The password hash never leaves the domain layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub phone_verified: bool,
    pub email_verified: bool,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            phone: user.phone.clone(),
            email: user.email.clone(),
            phone_verified: user.phone_verified,
            email_verified: user.email_verified,
        }
    }
}
