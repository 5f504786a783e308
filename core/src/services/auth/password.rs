//! Password hashing abstraction.
//!
//! The bcrypt-backed implementation lives in the infrastructure crate; tests
//! substitute a transparent fake.

/// One-way password hashing and verification
pub trait PasswordHasherTrait: Send + Sync {
    /// Hash a plaintext password
    fn hash(&self, plain: &str) -> Result<String, String>;

    /// Check a plaintext password against a stored hash
    fn verify(&self, plain: &str, hashed: &str) -> Result<bool, String>;
}
