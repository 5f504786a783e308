//! Unified error handling for the core domain layer.
//!
//! Every fallible domain operation returns [`DomainResult`]. Errors carry an
//! explicit status classification via [`DomainError::status`] and propagate
//! unchanged to the boundary layer, which renders them through
//! [`cc_shared::ErrorResponse`].

mod types;

pub use types::{AuthError, TokenError, ValidationError};

use cc_shared::ErrorResponse;
use thiserror::Error;

/// Top-level domain error
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The named resource does not exist
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// The operation conflicts with existing state
    #[error("{message}")]
    Conflict { message: String },

    /// The caller is not authorized for this operation
    #[error("Unauthorized")]
    Unauthorized,

    /// A storage-layer failure
    #[error("Database error: {0}")]
    Database(String),

    /// An unexpected internal failure
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Result alias used throughout the domain layer
pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Machine-readable error code for API payloads
    pub fn code(&self) -> &'static str {
        match self {
            Self::Auth(AuthError::InvalidCredentials { .. })
            | Self::Auth(AuthError::InvalidCredentialsLocked { .. }) => "INVALID_CREDENTIALS",
            Self::Auth(AuthError::TooManyAttempts { .. }) => "TOO_MANY_ATTEMPTS",
            Self::Auth(AuthError::UserNotFound) => "USER_NOT_FOUND",
            Self::Auth(AuthError::UserAlreadyExists) => "USER_ALREADY_EXISTS",
            Self::Auth(AuthError::DeliveryFailure { .. }) => "DELIVERY_FAILURE",
            Self::Token(TokenError::TokenExpired) => "TOKEN_EXPIRED",
            Self::Token(TokenError::RefreshTokenExpired) => "REFRESH_TOKEN_EXPIRED",
            Self::Token(TokenError::MissingRefreshToken) => "MISSING_REFRESH_TOKEN",
            Self::Token(TokenError::TokenGenerationFailed) => "TOKEN_GENERATION_FAILED",
            Self::Token(_) => "INVALID_TOKEN",
            Self::Validation(ValidationError::InvalidVerificationCode { .. }) => {
                "INVALID_VERIFICATION_CODE"
            }
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict { .. } => "CONFLICT",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// HTTP-class status this error maps to
    pub fn status(&self) -> u16 {
        match self {
            Self::Auth(AuthError::InvalidCredentials { .. })
            | Self::Auth(AuthError::InvalidCredentialsLocked { .. }) => 401,
            Self::Auth(AuthError::TooManyAttempts { .. }) => 429,
            Self::Auth(AuthError::UserNotFound) => 404,
            Self::Auth(AuthError::UserAlreadyExists) => 409,
            Self::Auth(AuthError::DeliveryFailure { .. }) => 502,
            Self::Token(TokenError::TokenGenerationFailed) => 500,
            Self::Token(_) => 401,
            Self::Validation(_) => 422,
            Self::NotFound { .. } => 404,
            Self::Conflict { .. } => 409,
            Self::Unauthorized => 401,
            Self::Database(_) => 500,
            Self::Internal { .. } => 500,
        }
    }

    /// Render as a boundary-layer error response
    pub fn to_response(&self) -> ErrorResponse {
        let response = ErrorResponse::new(self.code(), self, self.status());
        match self {
            Self::Validation(e) => response.with_field(e.field()),
            Self::Auth(AuthError::TooManyAttempts { minutes }) => {
                response.with_retry_after_minutes(*minutes)
            }
            Self::Auth(AuthError::InvalidCredentialsLocked { lock_minutes }) => {
                response.with_retry_after_minutes(*lock_minutes)
            }
            _ => response,
        }
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(error: &DomainError) -> Self {
        error.to_response()
    }
}
