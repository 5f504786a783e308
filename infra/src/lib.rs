//! Infrastructure layer for the CampusCompare account subsystem.
//!
//! Concrete implementations of the core crate's traits: MySQL repositories,
//! Twilio SMS, SMTP email, bcrypt password hashing, and the background
//! maintenance tasks.

pub mod database;
pub mod email;
pub mod security;
pub mod sms;
pub mod tasks;

use thiserror::Error;

/// Errors raised while constructing infrastructure components
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("SMS service error: {0}")]
    Sms(String),

    #[error("Email service error: {0}")]
    Email(String),
}

pub use database::connection::DatabasePool;
pub use database::mysql::{
    MySqlComparisonRepository, MySqlUserRepository, MySqlVerificationRepository,
};
pub use email::{MockEmailSender, SmtpEmailSender};
pub use security::BcryptPasswordHasher;
pub use sms::{MockSmsSender, TwilioSmsSender};
pub use tasks::MaintenanceService;
