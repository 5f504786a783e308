//! Configuration types shared across server modules

mod auth;
mod database;
mod security;

pub use auth::{AuthConfig, CookieConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use security::LockoutConfig;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Authentication configuration (tokens + refresh cookie)
    pub auth: AuthConfig,

    /// Login lockout policy
    pub lockout: LockoutConfig,

    /// Database connection configuration
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load the full configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            auth: AuthConfig::from_env(),
            lockout: LockoutConfig::default(),
            database: DatabaseConfig::from_env(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            auth: AuthConfig::default(),
            lockout: LockoutConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}
