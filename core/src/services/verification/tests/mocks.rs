//! Sender mocks and helpers for verification service tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::{VerificationPurpose, VerificationRecord};
use crate::errors::DomainResult;
use crate::repositories::{MockVerificationRepository, VerificationRepository};
use crate::services::verification::{EmailSenderTrait, SmsSenderTrait, VerificationService};

/// Records sent SMS messages; optionally fails every send
#[derive(Default, Clone)]
pub struct MockSmsSender {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    pub fail: Arc<Mutex<bool>>,
}

impl MockSmsSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_message(&self) -> Option<String> {
        self.sent.lock().unwrap().last().map(|(_, m)| m.clone())
    }
}

#[async_trait]
impl SmsSenderTrait for MockSmsSender {
    async fn send_sms(&self, phone: &str, message: &str) -> Result<String, String> {
        if *self.fail.lock().unwrap() {
            return Err("simulated SMS outage".to_string());
        }
        self.sent
            .lock()
            .unwrap()
            .push((phone.to_string(), message.to_string()));
        Ok(format!("SM{}", Uuid::new_v4().simple()))
    }
}

/// Records sent emails; optionally fails every send
#[derive(Default, Clone)]
pub struct MockEmailSender {
    pub sent: Arc<Mutex<Vec<(String, String, String)>>>,
    pub fail: Arc<Mutex<bool>>,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl EmailSenderTrait for MockEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), String> {
        if *self.fail.lock().unwrap() {
            return Err("simulated SMTP outage".to_string());
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

/// A repository whose collision probe always reports a hit
#[derive(Default)]
pub struct AlwaysCollidingRepository;

#[async_trait]
impl VerificationRepository for AlwaysCollidingRepository {
    async fn create(&self, _record: VerificationRecord) -> DomainResult<()> {
        Ok(())
    }

    async fn find_active_by_code(
        &self,
        purpose: VerificationPurpose,
        code: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<VerificationRecord>> {
        Ok(Some(VerificationRecord::new(
            purpose,
            "someone-else",
            code,
            None,
            now,
        )))
    }

    async fn find_for_redeem(
        &self,
        _purpose: VerificationPurpose,
        _code: &str,
        _target: Option<&str>,
        _now: DateTime<Utc>,
    ) -> DomainResult<Option<VerificationRecord>> {
        Ok(None)
    }

    async fn delete(&self, _id: Uuid) -> DomainResult<bool> {
        Ok(false)
    }

    async fn delete_for_target(
        &self,
        _purpose: VerificationPurpose,
        _target: &str,
    ) -> DomainResult<u64> {
        Ok(0)
    }

    async fn delete_expired(&self, _now: DateTime<Utc>) -> DomainResult<u64> {
        Ok(0)
    }
}

pub type TestVerificationService =
    VerificationService<MockVerificationRepository, MockSmsSender, MockEmailSender>;

pub struct TestHarness {
    pub repository: MockVerificationRepository,
    pub sms: MockSmsSender,
    pub email: MockEmailSender,
    pub service: TestVerificationService,
}

pub fn harness() -> TestHarness {
    let repository = MockVerificationRepository::new();
    let sms = MockSmsSender::new();
    let email = MockEmailSender::new();
    let service = VerificationService::new(
        Arc::new(repository.clone()),
        Arc::new(sms.clone()),
        Arc::new(email.clone()),
    );
    TestHarness {
        repository,
        sms,
        email,
        service,
    }
}
