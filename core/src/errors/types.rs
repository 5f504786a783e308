//! Specific error types for authentication, tokens and input validation

use thiserror::Error;

/// Authentication and account errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    /// Credentials did not match; the caller has attempts left
    #[error("Invalid credentials. {remaining_attempts} attempt(s) remaining")]
    InvalidCredentials { remaining_attempts: u32 },

    /// Credentials did not match and this failure triggered a lockout
    #[error("Invalid credentials. Account locked for {lock_minutes} minute(s)")]
    InvalidCredentialsLocked { lock_minutes: u32 },

    /// The (address, identifier) pair is currently locked out
    #[error("Too many failed attempts. Try again in {minutes} minute(s)")]
    TooManyAttempts { minutes: u32 },

    /// No account matches the supplied identifier
    #[error("User not found")]
    UserNotFound,

    /// An account already exists for the supplied identifier
    #[error("An account with this phone number already exists")]
    UserAlreadyExists,

    /// An outbound message could not be handed to its channel
    #[error("Failed to deliver {channel} message")]
    DeliveryFailure { channel: String },
}

/// Token issuance and validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TokenError {
    #[error("Access token has expired")]
    TokenExpired,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is malformed or carries invalid claims")]
    InvalidTokenFormat,

    #[error("Refresh token has expired")]
    RefreshTokenExpired,

    #[error("Refresh token is invalid")]
    InvalidRefreshToken,

    #[error("No refresh token was provided")]
    MissingRefreshToken,

    #[error("Failed to generate token")]
    TokenGenerationFailed,
}

/// Field-scoped input validation errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} is required")]
    RequiredField { field: String },

    #[error("{field} has an invalid format")]
    InvalidFormat { field: String },

    #[error("Invalid or expired verification code")]
    InvalidVerificationCode { field: String },

    #[error("Unknown verification purpose: {purpose}")]
    InvalidPurpose { purpose: String },
}

impl ValidationError {
    /// The input field this error is scoped to
    pub fn field(&self) -> &str {
        match self {
            Self::RequiredField { field }
            | Self::InvalidFormat { field }
            | Self::InvalidVerificationCode { field } => field,
            Self::InvalidPurpose { .. } => "purpose",
        }
    }
}
