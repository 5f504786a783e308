//! Domain services

pub mod auth;
pub mod token;
pub mod verification;

pub use auth::AuthService;
pub use token::TokenService;
pub use verification::VerificationService;
