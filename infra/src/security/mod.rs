//! Security primitives

mod password;

pub use password::BcryptPasswordHasher;
