//! JWT claims and token pair entities.
//!
//! Access and refresh tokens are signed with separate secrets. Access tokens
//! carry a snapshot of the user's active comparison-list count taken at
//! issuance; the snapshot is not refreshed while the token lives.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default access token lifetime
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Default refresh token lifetime
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// Claims embedded in an access token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: the user id
    pub sub: String,
    /// Display name, so the boundary layer can greet without a lookup
    pub name: String,
    /// Active comparison lists at issuance time
    pub comparison_count: u32,
    /// Issued-at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
    /// Not-before (unix seconds)
    pub nbf: i64,
    pub iss: String,
    pub aud: String,
    /// Unique token id
    pub jti: String,
}

impl AccessClaims {
    pub fn new(
        user_id: Uuid,
        name: &str,
        comparison_count: u32,
        validity: Duration,
        issuer: &str,
        audience: &str,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            name: name.to_string(),
            comparison_count,
            iat: now.timestamp(),
            exp: (now + validity).timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Parse the subject back into a user id
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Claims embedded in a refresh token.
///
/// Carries enough identity to mint a new access token without a user-store
/// lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: String,
    pub name: String,
    pub iat: i64,
    pub exp: i64,
    pub nbf: i64,
    pub iss: String,
    pub aud: String,
    pub jti: String,
}

impl RefreshClaims {
    pub fn new(user_id: Uuid, name: &str, validity: Duration, issuer: &str, audience: &str) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            name: name.to_string(),
            iat: now.timestamp(),
            exp: (now + validity).timestamp(),
            nbf: now.timestamp(),
            iss: issuer.to_string(),
            aud: audience.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// An access/refresh token pair returned on login and registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            refresh_token,
            expires_in,
        }
    }
}
