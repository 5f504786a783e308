//! Authentication service tests

use crate::domain::entities::VerificationPurpose;
use crate::errors::{AuthError, DomainError, TokenError, ValidationError};

use super::mocks::{harness, seed_user};

const ADDR: &str = "203.0.113.7";

#[tokio::test]
async fn test_login_success_returns_tokens_and_sanitized_user() {
    let h = harness();
    let user = seed_user(&h, "Alice", "0912345678", "alice@example.edu");
    h.comparisons.set_count(user.id, 3);

    let result = h.service.login(ADDR, "0912345678", "password").await.unwrap();

    assert_eq!(result.user.id, user.id);
    assert_eq!(result.user.name, "Alice");
    assert!(!result.tokens.access_token.is_empty());
    assert!(!result.tokens.refresh_token.is_empty());
    assert_eq!(result.tokens.expires_in, 900);

    let claims = h
        .token_service
        .verify_access_token(&result.tokens.access_token)
        .unwrap();
    assert_eq!(claims.user_id().unwrap(), user.id);
    assert_eq!(claims.comparison_count, 3);

    // Successful login updated the account's last-login stamp
    let stored = h.users.users.lock().unwrap().get(&user.id).cloned().unwrap();
    assert!(stored.last_login_at.is_some());
}

#[tokio::test]
async fn test_login_wrong_password_reports_remaining_attempts() {
    let h = harness();
    seed_user(&h, "Alice", "0912345678", "alice@example.edu");

    let first = h.service.login(ADDR, "0912345678", "wrong").await;
    assert!(matches!(
        first,
        Err(DomainError::Auth(AuthError::InvalidCredentials {
            remaining_attempts: 4
        }))
    ));

    let second = h.service.login(ADDR, "0912345678", "wrong").await;
    assert!(matches!(
        second,
        Err(DomainError::Auth(AuthError::InvalidCredentials {
            remaining_attempts: 3
        }))
    ));
    assert_eq!(h.tracker.failure_count(ADDR, "0912345678"), 2);
    assert!(!h.tracker.is_locked(ADDR, "0912345678"));
}

#[tokio::test]
async fn test_login_for_unknown_account_counts_as_failure() {
    let h = harness();

    let result = h.service.login(ADDR, "0999999999", "whatever").await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::InvalidCredentials { .. }))
    ));
    assert_eq!(h.tracker.failure_count(ADDR, "0999999999"), 1);
}

#[tokio::test]
async fn test_third_failure_locks_and_gates_further_attempts() {
    let h = harness();
    seed_user(&h, "Alice", "0912345678", "alice@example.edu");

    for _ in 0..2 {
        let _ = h.service.login(ADDR, "0912345678", "wrong").await;
    }
    let third = h.service.login(ADDR, "0912345678", "wrong").await;
    assert!(matches!(
        third,
        Err(DomainError::Auth(AuthError::InvalidCredentialsLocked {
            lock_minutes: 2
        }))
    ));

    // Even the correct password is rejected while the lock holds
    let gated = h.service.login(ADDR, "0912345678", "password").await;
    match gated {
        Err(DomainError::Auth(AuthError::TooManyAttempts { minutes })) => {
            assert!(minutes >= 1 && minutes <= 2);
        }
        other => panic!("expected TooManyAttempts, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn test_successful_login_resets_the_counter() {
    let h = harness();
    seed_user(&h, "Alice", "0912345678", "alice@example.edu");

    for _ in 0..2 {
        let _ = h.service.login(ADDR, "0912345678", "wrong").await;
    }
    h.service.login(ADDR, "0912345678", "password").await.unwrap();
    assert_eq!(h.tracker.failure_count(ADDR, "0912345678"), 0);
}

#[tokio::test]
async fn test_login_rejects_malformed_phone() {
    let h = harness();
    let result = h.service.login(ADDR, "not-a-phone", "password").await;
    assert!(matches!(
        result,
        Err(DomainError::Validation(ValidationError::InvalidFormat { .. }))
    ));
}

#[tokio::test]
async fn test_register_success_flow() {
    let h = harness();
    let code = h
        .verification_service
        .issue(VerificationPurpose::Phone, "+886987002093", None)
        .await
        .unwrap()
        .code;

    let result = h
        .service
        .register(super::mocks::register_request(
            "Bob",
            "+886987002093",
            "bob@example.edu",
            "s3cret-password",
            &code,
        ))
        .await
        .unwrap();

    assert!(result.user.phone_verified);
    assert!(!result.user.email_verified);
    assert!(!result.tokens.access_token.is_empty());

    // A verification email went out, backed by a stored email record
    assert_eq!(h.email.sent_count(), 1);
    let records = h.verifications.records.lock().unwrap();
    let email_record = records
        .iter()
        .find(|r| r.purpose == VerificationPurpose::Email)
        .unwrap();
    assert_eq!(email_record.target, "bob@example.edu");
    assert_eq!(email_record.user_id, Some(result.user.id));
}

#[tokio::test]
async fn test_register_with_bad_code_is_field_scoped() {
    let h = harness();
    let result = h
        .service
        .register(super::mocks::register_request(
            "Bob",
            "+886987002093",
            "bob@example.edu",
            "s3cret-password",
            "000000",
        ))
        .await;

    let error = result.err().unwrap();
    assert!(matches!(
        error,
        DomainError::Validation(ValidationError::InvalidVerificationCode { .. })
    ));
    let response = error.to_response();
    assert_eq!(response.field.as_deref(), Some("verification_code"));
    assert_eq!(response.status, 422);
}

#[tokio::test]
async fn test_register_duplicate_phone_conflicts() {
    let h = harness();
    seed_user(&h, "Alice", "0912345678", "alice@example.edu");
    let code = h
        .verification_service
        .issue(VerificationPurpose::Phone, "0912345678", None)
        .await
        .unwrap()
        .code;

    let result = h
        .service
        .register(super::mocks::register_request(
            "Imposter",
            "0912345678",
            "other@example.edu",
            "s3cret-password",
            &code,
        ))
        .await;

    let error = result.err().unwrap();
    assert!(matches!(error, DomainError::Auth(AuthError::UserAlreadyExists)));
    assert_eq!(error.status(), 409);
}

#[tokio::test]
async fn test_register_fails_when_verification_email_cannot_send() {
    let h = harness();
    h.email.set_fail(true);
    let code = h
        .verification_service
        .issue(VerificationPurpose::Phone, "+886987002093", None)
        .await
        .unwrap()
        .code;

    let result = h
        .service
        .register(super::mocks::register_request(
            "Bob",
            "+886987002093",
            "bob@example.edu",
            "s3cret-password",
            &code,
        ))
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::DeliveryFailure { .. }))
    ));
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let h = harness();
    let result = h
        .service
        .register(super::mocks::register_request(
            "Bob",
            "+886987002093",
            "bob@example.edu",
            "short",
            "123456",
        ))
        .await;
    let error = result.err().unwrap();
    assert_eq!(error.to_response().field.as_deref(), Some("password"));
}

#[tokio::test]
async fn test_refresh_mints_access_token_with_fresh_count() {
    let h = harness();
    let user = seed_user(&h, "Alice", "0912345678", "alice@example.edu");
    h.comparisons.set_count(user.id, 1);

    let login = h.service.login(ADDR, "0912345678", "password").await.unwrap();

    // Count changes between login and refresh; the refreshed token carries
    // the new snapshot while the old token keeps the old one
    h.comparisons.set_count(user.id, 4);
    let refreshed = h
        .service
        .refresh_token(Some(&login.tokens.refresh_token))
        .await
        .unwrap();

    let old_claims = h
        .token_service
        .verify_access_token(&login.tokens.access_token)
        .unwrap();
    let new_claims = h
        .token_service
        .verify_access_token(&refreshed.access_token)
        .unwrap();
    assert_eq!(old_claims.comparison_count, 1);
    assert_eq!(new_claims.comparison_count, 4);
    assert_eq!(new_claims.user_id().unwrap(), user.id);
    assert_eq!(refreshed.expires_in, 900);
}

#[tokio::test]
async fn test_refresh_without_token_is_rejected() {
    let h = harness();
    let result = h.service.refresh_token(None).await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::MissingRefreshToken))
    ));
}

#[tokio::test]
async fn test_access_token_is_not_a_valid_refresh_token() {
    let h = harness();
    seed_user(&h, "Alice", "0912345678", "alice@example.edu");
    let login = h.service.login(ADDR, "0912345678", "password").await.unwrap();

    let result = h
        .service
        .refresh_token(Some(&login.tokens.access_token))
        .await;
    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::InvalidRefreshToken))
    ));
}

#[tokio::test]
async fn test_verify_phone_marks_existing_account() {
    let h = harness();
    let user = seed_user(&h, "Alice", "0912345678", "alice@example.edu");
    let code = h
        .verification_service
        .issue(VerificationPurpose::Phone, "0912345678", None)
        .await
        .unwrap()
        .code;

    h.service.verify_phone("0912345678", &code).await.unwrap();

    let stored = h.users.users.lock().unwrap().get(&user.id).cloned().unwrap();
    assert!(stored.phone_verified);
}

#[tokio::test]
async fn test_verify_email_marks_account() {
    let h = harness();
    let user = seed_user(&h, "Alice", "0912345678", "alice@example.edu");
    let code = h
        .verification_service
        .issue(VerificationPurpose::Email, "alice@example.edu", Some(user.id))
        .await
        .unwrap()
        .code;

    h.service.verify_email(&code).await.unwrap();

    let stored = h.users.users.lock().unwrap().get(&user.id).cloned().unwrap();
    assert!(stored.email_verified);
}

#[tokio::test]
async fn test_password_reset_round_trip() {
    let h = harness();
    let user = seed_user(&h, "Alice", "0912345678", "alice@example.edu");

    let sent = h
        .service
        .request_password_reset("alice@example.edu")
        .await
        .unwrap();
    assert_eq!(sent.record.user_id, Some(user.id));
    assert_eq!(h.email.sent_count(), 1);

    h.service
        .reset_password(&sent.record.code, "new-password-123")
        .await
        .unwrap();

    // Old password no longer works; the new one does
    assert!(h.service.login(ADDR, "0912345678", "password").await.is_err());
    h.tracker.reset(ADDR, "0912345678");
    h.service
        .login(ADDR, "0912345678", "new-password-123")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_password_reset_for_unknown_email() {
    let h = harness();
    let result = h.service.request_password_reset("ghost@example.edu").await;
    let error = result.err().unwrap();
    assert!(matches!(error, DomainError::Auth(AuthError::UserNotFound)));
    assert_eq!(error.status(), 404);
}

#[tokio::test]
async fn test_reset_code_is_single_use() {
    let h = harness();
    seed_user(&h, "Alice", "0912345678", "alice@example.edu");
    let sent = h
        .service
        .request_password_reset("alice@example.edu")
        .await
        .unwrap();

    h.service
        .reset_password(&sent.record.code, "new-password-123")
        .await
        .unwrap();
    let again = h
        .service
        .reset_password(&sent.record.code, "another-password")
        .await;
    assert!(matches!(
        again,
        Err(DomainError::Validation(
            ValidationError::InvalidVerificationCode { .. }
        ))
    ));
}
