//! Authentication service orchestrating login, registration, refresh and the
//! verification flows.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use cc_shared::utils::{is_valid_email, is_valid_phone, mask_phone_number};

use crate::domain::entities::{PublicUser, TokenPair, User, VerificationPurpose};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError, ValidationError};
use crate::repositories::{ComparisonRepository, UserRepository, VerificationRepository};
use crate::services::token::TokenService;
use crate::services::verification::{
    EmailSenderTrait, SendCodeResult, SmsSenderTrait, VerificationService,
};

use super::config::AuthServiceConfig;
use super::login_tracker::LoginAttemptTracker;
use super::password::PasswordHasherTrait;

/// Registration request payload
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    /// Phone code obtained via `send_phone_code`
    pub verification_code: String,
}

/// Successful login or registration outcome
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub user: PublicUser,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

/// Successful refresh outcome; the refresh token itself is unchanged
#[derive(Debug, Clone, Serialize)]
pub struct RefreshResult {
    pub access_token: String,
    pub expires_in: i64,
}

/// Orchestrates authentication across the user store, verification service,
/// attempt tracker and token service.
pub struct AuthService<U, V, S, E, P, H>
where
    U: UserRepository,
    V: VerificationRepository,
    S: SmsSenderTrait,
    E: EmailSenderTrait,
    P: ComparisonRepository,
    H: PasswordHasherTrait,
{
    user_repository: Arc<U>,
    verification_service: Arc<VerificationService<V, S, E>>,
    token_service: Arc<TokenService<P>>,
    attempt_tracker: Arc<LoginAttemptTracker>,
    password_hasher: Arc<H>,
    config: AuthServiceConfig,
}

impl<U, V, S, E, P, H> AuthService<U, V, S, E, P, H>
where
    U: UserRepository,
    V: VerificationRepository,
    S: SmsSenderTrait,
    E: EmailSenderTrait,
    P: ComparisonRepository,
    H: PasswordHasherTrait,
{
    pub fn new(
        user_repository: Arc<U>,
        verification_service: Arc<VerificationService<V, S, E>>,
        token_service: Arc<TokenService<P>>,
        attempt_tracker: Arc<LoginAttemptTracker>,
        password_hasher: Arc<H>,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            verification_service,
            token_service,
            attempt_tracker,
            password_hasher,
            config,
        }
    }

    /// Authenticate with phone number and password.
    ///
    /// `address` is the client's network address, used with the phone number
    /// to key the attempt tracker. The lockout gate runs before any
    /// credential work, so a locked caller learns nothing about whether the
    /// password was right.
    pub async fn login(
        &self,
        address: &str,
        phone: &str,
        password: &str,
    ) -> DomainResult<LoginResult> {
        if !is_valid_phone(phone) {
            return Err(ValidationError::InvalidFormat {
                field: "phone".to_string(),
            }
            .into());
        }

        if self.attempt_tracker.is_locked(address, phone) {
            let minutes = self
                .attempt_tracker
                .locked_for(address, phone)
                .map(|d| ((d.num_seconds() + 59) / 60).max(1) as u32)
                .unwrap_or(1);
            warn!(
                address,
                phone = %mask_phone_number(phone),
                "login rejected: pair is locked out"
            );
            return Err(AuthError::TooManyAttempts { minutes }.into());
        }

        let user = match self.user_repository.find_by_phone(phone).await? {
            Some(user) => user,
            // A missing account counts as a failure, same as a bad password
            None => return Err(self.failed_login(address, phone)),
        };

        let password_ok = self
            .password_hasher
            .verify(password, &user.password_hash)
            .map_err(|e| DomainError::Internal {
                message: format!("password verification failed: {}", e),
            })?;
        if !password_ok {
            return Err(self.failed_login(address, phone));
        }

        self.attempt_tracker.reset(address, phone);

        let mut user = user;
        user.update_last_login();
        let user = self.user_repository.update(user).await?;

        let tokens = self
            .token_service
            .issue_token_pair(user.id, &user.name)
            .await?;
        info!(user_id = %user.id, "login succeeded");

        Ok(LoginResult {
            user: user.sanitized(),
            tokens,
        })
    }

    fn failed_login(&self, address: &str, phone: &str) -> DomainError {
        let info = self.attempt_tracker.record_failure(address, phone);
        warn!(
            address,
            phone = %mask_phone_number(phone),
            remaining = info.remaining_attempts,
            "login failed"
        );
        match info.lock_minutes {
            Some(minutes) => AuthError::InvalidCredentialsLocked {
                lock_minutes: minutes as u32,
            }
            .into(),
            None => AuthError::InvalidCredentials {
                remaining_attempts: info.remaining_attempts,
            }
            .into(),
        }
    }

    /// Register a new account.
    ///
    /// Phone ownership is proven first by redeeming the SMS code; only then
    /// is the account created, already phone-verified. A verification email
    /// is dispatched as part of registration, and a dispatch failure fails
    /// the whole operation.
    pub async fn register(&self, request: RegisterRequest) -> DomainResult<LoginResult> {
        self.validate_registration(&request)?;

        self.verification_service
            .redeem(
                VerificationPurpose::Phone,
                &request.verification_code,
                Some(&request.phone),
            )
            .await?;

        if self.user_repository.exists_by_phone(&request.phone).await? {
            return Err(AuthError::UserAlreadyExists.into());
        }

        let password_hash =
            self.password_hasher
                .hash(&request.password)
                .map_err(|e| DomainError::Internal {
                    message: format!("password hashing failed: {}", e),
                })?;

        let mut user = User::new(request.name, request.phone, request.email, password_hash);
        user.verify_phone();
        let user = self.user_repository.create(user).await?;
        info!(user_id = %user.id, "account registered");

        let tokens = self
            .token_service
            .issue_token_pair(user.id, &user.name)
            .await?;

        self.verification_service
            .send_email_verification(&user.email, user.id)
            .await?;

        Ok(LoginResult {
            user: user.sanitized(),
            tokens,
        })
    }

    fn validate_registration(&self, request: &RegisterRequest) -> DomainResult<()> {
        if request.name.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "name".to_string(),
            }
            .into());
        }
        if !is_valid_phone(&request.phone) {
            return Err(ValidationError::InvalidFormat {
                field: "phone".to_string(),
            }
            .into());
        }
        if !is_valid_email(&request.email) {
            return Err(ValidationError::InvalidFormat {
                field: "email".to_string(),
            }
            .into());
        }
        if request.password.len() < self.config.min_password_length {
            return Err(ValidationError::InvalidFormat {
                field: "password".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Mint a new access token from a refresh token.
    ///
    /// The new token is derived from the refresh claims without a user-store
    /// lookup; only the comparison-count provider is consulted for a fresh
    /// snapshot.
    pub async fn refresh_token(&self, refresh_token: Option<&str>) -> DomainResult<RefreshResult> {
        let token = refresh_token.ok_or(DomainError::Token(TokenError::MissingRefreshToken))?;
        let claims = self.token_service.verify_refresh_token(token)?;
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidRefreshToken))?;

        let access_token = self
            .token_service
            .issue_access_token(user_id, &claims.name)
            .await?;
        Ok(RefreshResult {
            access_token,
            expires_in: self.token_service.access_expiry_seconds(),
        })
    }

    /// Log out.
    ///
    /// Tokens are stateless, so there is nothing to revoke server-side; the
    /// boundary layer clears the refresh-token cookie.
    pub fn logout(&self, user_id: Option<Uuid>) {
        match user_id {
            Some(id) => info!(user_id = %id, "logout"),
            None => info!("logout (anonymous)"),
        }
    }

    /// Send a phone verification code for registration or re-verification
    pub async fn send_phone_code(&self, phone: &str) -> DomainResult<SendCodeResult> {
        if !is_valid_phone(phone) {
            return Err(ValidationError::InvalidFormat {
                field: "phone".to_string(),
            }
            .into());
        }
        self.verification_service.send_phone_code(phone).await
    }

    /// Redeem a phone code outside registration.
    ///
    /// Pre-registration codes have no owning account yet; when one exists,
    /// its phone-verified flag is raised.
    pub async fn verify_phone(&self, phone: &str, code: &str) -> DomainResult<()> {
        self.verification_service
            .redeem(VerificationPurpose::Phone, code, Some(phone))
            .await?;

        if let Some(mut user) = self.user_repository.find_by_phone(phone).await? {
            if !user.phone_verified {
                user.verify_phone();
                self.user_repository.update(user).await?;
            }
        }
        Ok(())
    }

    /// Re-send the email verification code for an existing account
    pub async fn send_email_verification(&self, user_id: Uuid) -> DomainResult<SendCodeResult> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::from(AuthError::UserNotFound))?;
        self.verification_service
            .send_email_verification(&user.email, user.id)
            .await
    }

    /// Redeem an email verification code and mark the account verified
    pub async fn verify_email(&self, code: &str) -> DomainResult<()> {
        let record = self
            .verification_service
            .redeem(VerificationPurpose::Email, code, None)
            .await?;
        let user_id = record.user_id.ok_or_else(|| DomainError::Internal {
            message: "email verification record has no owner".to_string(),
        })?;

        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::from(AuthError::UserNotFound))?;
        if !user.email_verified {
            user.verify_email();
            self.user_repository.update(user).await?;
        }
        info!(user_id = %user_id, "email verified");
        Ok(())
    }

    /// Start a password reset by emailing a reset code
    pub async fn request_password_reset(&self, email: &str) -> DomainResult<SendCodeResult> {
        if !is_valid_email(email) {
            return Err(ValidationError::InvalidFormat {
                field: "email".to_string(),
            }
            .into());
        }
        let user = self
            .user_repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::from(AuthError::UserNotFound))?;
        self.verification_service
            .send_password_reset(&user.email, user.id)
            .await
    }

    /// Complete a password reset with the emailed code
    pub async fn reset_password(&self, code: &str, new_password: &str) -> DomainResult<()> {
        if new_password.len() < self.config.min_password_length {
            return Err(ValidationError::InvalidFormat {
                field: "password".to_string(),
            }
            .into());
        }

        let record = self
            .verification_service
            .redeem(VerificationPurpose::PasswordReset, code, None)
            .await?;
        let user_id = record.user_id.ok_or_else(|| DomainError::Internal {
            message: "password reset record has no owner".to_string(),
        })?;

        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::from(AuthError::UserNotFound))?;
        user.password_hash =
            self.password_hasher
                .hash(new_password)
                .map_err(|e| DomainError::Internal {
                    message: format!("password hashing failed: {}", e),
                })?;
        self.user_repository.update(user).await?;
        info!(user_id = %user_id, "password reset completed");
        Ok(())
    }

    /// Access to the attempt tracker, for maintenance sweeps
    pub fn attempt_tracker(&self) -> &LoginAttemptTracker {
        &self.attempt_tracker
    }
}
