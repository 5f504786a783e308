//! Verification service: issue, redeem and sweep verification codes.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info};
use uuid::Uuid;

use cc_shared::utils::mask_phone_number;

use crate::domain::entities::{VerificationPurpose, VerificationRecord};
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::VerificationRepository;

use super::code_generator::CodeGenerator;
use super::traits::{EmailSenderTrait, SmsSenderTrait};
use super::types::SendCodeResult;

/// Manages the lifecycle of verification codes across all purposes.
///
/// Invariant: at most one active record exists per (purpose, target) pair.
/// Issuance deletes any predecessor before storing the new record, and
/// redemption deletes the record it matched, so codes are single-use.
pub struct VerificationService<V, S, E>
where
    V: VerificationRepository,
    S: SmsSenderTrait,
    E: EmailSenderTrait,
{
    repository: Arc<V>,
    generator: CodeGenerator<V>,
    sms_sender: Arc<S>,
    email_sender: Arc<E>,
}

impl<V, S, E> VerificationService<V, S, E>
where
    V: VerificationRepository,
    S: SmsSenderTrait,
    E: EmailSenderTrait,
{
    pub fn new(repository: Arc<V>, sms_sender: Arc<S>, email_sender: Arc<E>) -> Self {
        let generator = CodeGenerator::new(Arc::clone(&repository));
        Self {
            repository,
            generator,
            sms_sender,
            email_sender,
        }
    }

    /// Issue a fresh code for (purpose, target), superseding any active one.
    ///
    /// The clock is read once at the start; generation, supersession and the
    /// stored expiry all use that instant.
    pub async fn issue(
        &self,
        purpose: VerificationPurpose,
        target: &str,
        user_id: Option<Uuid>,
    ) -> DomainResult<VerificationRecord> {
        let now = Utc::now();
        let code = self.generator.generate(purpose, now).await?;

        let superseded = self.repository.delete_for_target(purpose, target).await?;
        if superseded > 0 {
            debug!(purpose = %purpose, superseded, "superseded previous verification code");
        }

        let record = VerificationRecord::new(purpose, target, code, user_id, now);
        self.repository.create(record.clone()).await?;
        Ok(record)
    }

    /// Redeem a code: find the matching unexpired record and consume it.
    ///
    /// For target-bound purposes the caller must supply the target the code
    /// was issued for. A miss, an expired record, or a target mismatch all
    /// surface as the same field-scoped validation error.
    pub async fn redeem(
        &self,
        purpose: VerificationPurpose,
        code: &str,
        target: Option<&str>,
    ) -> DomainResult<VerificationRecord> {
        let now = Utc::now();

        let bound_target = if purpose.policy().target_bound_redeem {
            match target {
                Some(t) => Some(t),
                None => {
                    return Err(ValidationError::RequiredField {
                        field: "target".to_string(),
                    }
                    .into())
                }
            }
        } else {
            None
        };

        let record = self
            .repository
            .find_for_redeem(purpose, code, bound_target, now)
            .await?
            .ok_or_else(|| {
                DomainError::from(ValidationError::InvalidVerificationCode {
                    field: "verification_code".to_string(),
                })
            })?;

        self.repository.delete(record.id).await?;
        info!(purpose = %purpose, record_id = %record.id, "verification code redeemed");
        Ok(record)
    }

    /// Issue a phone code and dispatch it over SMS
    pub async fn send_phone_code(&self, phone: &str) -> DomainResult<SendCodeResult> {
        let record = self
            .issue(VerificationPurpose::Phone, phone, None)
            .await?;
        let message = format!(
            "Your CampusCompare verification code is {}. It expires in {} minutes.",
            record.code,
            VerificationPurpose::Phone.policy().ttl_minutes
        );

        let message_id = self
            .sms_sender
            .send_sms(phone, &message)
            .await
            .map_err(|e| {
                error!(
                    phone = %mask_phone_number(phone),
                    error = %e,
                    "failed to dispatch verification SMS"
                );
                DomainError::from(AuthError::DeliveryFailure {
                    channel: "sms".to_string(),
                })
            })?;

        info!(phone = %mask_phone_number(phone), "verification SMS dispatched");
        Ok(SendCodeResult {
            record,
            message_id: Some(message_id),
        })
    }

    /// Issue an email-verification code and dispatch it
    pub async fn send_email_verification(
        &self,
        email: &str,
        user_id: Uuid,
    ) -> DomainResult<SendCodeResult> {
        let record = self
            .issue(VerificationPurpose::Email, email, Some(user_id))
            .await?;
        let body = format!(
            "Welcome to CampusCompare!\n\n\
             Confirm your email address with this code: {}\n\n\
             The code expires in 24 hours.",
            record.code
        );

        self.dispatch_email(email, "Confirm your CampusCompare email", &body)
            .await?;
        Ok(SendCodeResult {
            record,
            message_id: None,
        })
    }

    /// Issue a password-reset code and dispatch it
    pub async fn send_password_reset(
        &self,
        email: &str,
        user_id: Uuid,
    ) -> DomainResult<SendCodeResult> {
        let record = self
            .issue(VerificationPurpose::PasswordReset, email, Some(user_id))
            .await?;
        let body = format!(
            "A password reset was requested for your CampusCompare account.\n\n\
             Use this code to choose a new password: {}\n\n\
             The code expires in {} minutes. If you did not request a reset,\n\
             you can ignore this message.",
            record.code,
            VerificationPurpose::PasswordReset.policy().ttl_minutes
        );

        self.dispatch_email(email, "Reset your CampusCompare password", &body)
            .await?;
        Ok(SendCodeResult {
            record,
            message_id: None,
        })
    }

    /// Remove every expired record; returns the count removed.
    ///
    /// Expiry is already enforced at read time, so the sweep only reclaims
    /// storage.
    pub async fn sweep_expired(&self) -> DomainResult<u64> {
        let now = Utc::now();
        let removed = self.repository.delete_expired(now).await?;
        if removed > 0 {
            info!(removed, "swept expired verification records");
        }
        Ok(removed)
    }

    async fn dispatch_email(&self, to: &str, subject: &str, body: &str) -> DomainResult<()> {
        self.email_sender
            .send_email(to, subject, body)
            .await
            .map_err(|e| {
                error!(error = %e, "failed to dispatch verification email");
                DomainError::from(AuthError::DeliveryFailure {
                    channel: "email".to_string(),
                })
            })
    }
}
