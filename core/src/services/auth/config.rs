//! Authentication service configuration

use cc_shared::config::LockoutConfig;

/// Tunables for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Minimum accepted password length at registration
    pub min_password_length: usize,
    /// Lockout escalation parameters for the attempt tracker
    pub lockout: LockoutConfig,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            min_password_length: 8,
            lockout: LockoutConfig::default(),
        }
    }
}
