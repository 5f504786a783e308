//! Core domain layer for the CampusCompare account subsystem.
//!
//! This crate contains the business logic for account security and
//! verification: verification-code issuance and redemption, login attempt
//! tracking with escalating lockouts, JWT issuance and validation, and the
//! orchestrating authentication service. It has no knowledge of HTTP or
//! storage engines; those concerns live behind the repository and sender
//! traits defined here and are implemented by the infrastructure crate.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

pub use errors::{DomainError, DomainResult};
pub use services::auth::AuthService;
pub use services::token::TokenService;
pub use services::verification::VerificationService;
