//! Bcrypt-backed password hashing

use bcrypt::{hash, verify, DEFAULT_COST};

use cc_core::services::auth::PasswordHasherTrait;

/// Production [`PasswordHasherTrait`] using bcrypt
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Override the work factor, e.g. a low cost for test fixtures
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasherTrait for BcryptPasswordHasher {
    fn hash(&self, plain: &str) -> Result<String, String> {
        hash(plain, self.cost).map_err(|e| format!("bcrypt hash failed: {}", e))
    }

    fn verify(&self, plain: &str, hashed: &str) -> Result<bool, String> {
        verify(plain, hashed).map_err(|e| format!("bcrypt verify failed: {}", e))
    }
}
