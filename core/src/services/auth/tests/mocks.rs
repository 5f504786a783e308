//! Mocks and harness for authentication service tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use cc_shared::config::JwtConfig;

use crate::domain::entities::User;
use crate::repositories::{
    MockComparisonRepository, MockUserRepository, MockVerificationRepository,
};
use crate::services::auth::{
    AuthService, AuthServiceConfig, LoginAttemptTracker, PasswordHasherTrait,
};
use crate::services::token::TokenService;
use crate::services::verification::{EmailSenderTrait, SmsSenderTrait, VerificationService};

/// Transparent password hasher: `hash(p)` is `"hashed:" + p`
#[derive(Default, Clone)]
pub struct MockPasswordHasher;

impl PasswordHasherTrait for MockPasswordHasher {
    fn hash(&self, plain: &str) -> Result<String, String> {
        Ok(format!("hashed:{}", plain))
    }

    fn verify(&self, plain: &str, hashed: &str) -> Result<bool, String> {
        Ok(hashed == format!("hashed:{}", plain))
    }
}

#[derive(Default, Clone)]
pub struct MockSmsSender {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
}

#[async_trait]
impl SmsSenderTrait for MockSmsSender {
    async fn send_sms(&self, phone: &str, message: &str) -> Result<String, String> {
        self.sent
            .lock()
            .unwrap()
            .push((phone.to_string(), message.to_string()));
        Ok("SM0".to_string())
    }
}

#[derive(Default, Clone)]
pub struct MockEmailSender {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    pub fail: Arc<Mutex<bool>>,
}

impl MockEmailSender {
    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl EmailSenderTrait for MockEmailSender {
    async fn send_email(&self, to: &str, subject: &str, _body: &str) -> Result<(), String> {
        if *self.fail.lock().unwrap() {
            return Err("simulated SMTP outage".to_string());
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string()));
        Ok(())
    }
}

pub type TestAuthService = AuthService<
    MockUserRepository,
    MockVerificationRepository,
    MockSmsSender,
    MockEmailSender,
    MockComparisonRepository,
    MockPasswordHasher,
>;

pub struct TestHarness {
    pub users: MockUserRepository,
    pub verifications: MockVerificationRepository,
    pub comparisons: MockComparisonRepository,
    pub email: MockEmailSender,
    pub tracker: Arc<LoginAttemptTracker>,
    pub verification_service:
        Arc<VerificationService<MockVerificationRepository, MockSmsSender, MockEmailSender>>,
    pub token_service: Arc<TokenService<MockComparisonRepository>>,
    pub service: TestAuthService,
}

pub fn harness() -> TestHarness {
    let users = MockUserRepository::new();
    let verifications = MockVerificationRepository::new();
    let comparisons = MockComparisonRepository::new();
    let email = MockEmailSender::default();
    let tracker = Arc::new(LoginAttemptTracker::with_defaults());

    let verification_service = Arc::new(VerificationService::new(
        Arc::new(verifications.clone()),
        Arc::new(MockSmsSender::default()),
        Arc::new(email.clone()),
    ));
    let token_service = Arc::new(TokenService::new(
        Arc::new(comparisons.clone()),
        JwtConfig::default(),
    ));
    let service = AuthService::new(
        Arc::new(users.clone()),
        Arc::clone(&verification_service),
        Arc::clone(&token_service),
        Arc::clone(&tracker),
        Arc::new(MockPasswordHasher),
        AuthServiceConfig::default(),
    );

    TestHarness {
        users,
        verifications,
        comparisons,
        email,
        tracker,
        verification_service,
        token_service,
        service,
    }
}

/// Seed a user whose password is `password` (hashed by the mock hasher)
pub fn seed_user(harness: &TestHarness, name: &str, phone: &str, email: &str) -> User {
    let user = User::new(name, phone, email, "hashed:password");
    harness.users.insert(user.clone());
    user
}

pub fn register_request(
    name: &str,
    phone: &str,
    email: &str,
    password: &str,
    code: &str,
) -> crate::services::auth::RegisterRequest {
    crate::services::auth::RegisterRequest {
        name: name.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        verification_code: code.to_string(),
    }
}
