//! Shared utilities and common types for the CampusCompare server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Response structures for the boundary layer
//! - Utility functions (phone/email validation, masking)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, AuthConfig, CookieConfig, DatabaseConfig, JwtConfig, LockoutConfig};
pub use types::ErrorResponse;
pub use utils::validation;
