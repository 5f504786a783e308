//! In-memory verification repository for tests

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::{VerificationPurpose, VerificationRecord};
use crate::errors::DomainResult;

use super::VerificationRepository;

/// In-memory [`VerificationRepository`] backed by a `Vec`.
///
/// Records are exposed so tests can seed codes and backdate expiries without
/// waiting on the clock.
#[derive(Default, Clone)]
pub struct MockVerificationRepository {
    pub records: Arc<Mutex<Vec<VerificationRecord>>>,
}

impl MockVerificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, expired or not
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rewrite a record's expiry, simulating the passage of time
    pub fn backdate(&self, id: Uuid, expires_at: DateTime<Utc>) {
        let mut records = self.records.lock().unwrap();
        if let Some(record) = records.iter_mut().find(|r| r.id == id) {
            record.expires_at = expires_at;
        }
    }
}

#[async_trait]
impl VerificationRepository for MockVerificationRepository {
    async fn create(&self, record: VerificationRecord) -> DomainResult<()> {
        self.records.lock().unwrap().push(record);
        Ok(())
    }

    async fn find_active_by_code(
        &self,
        purpose: VerificationPurpose,
        code: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<VerificationRecord>> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .find(|r| r.purpose == purpose && r.code == code && !r.is_expired_at(now))
            .cloned())
    }

    async fn find_for_redeem(
        &self,
        purpose: VerificationPurpose,
        code: &str,
        target: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<VerificationRecord>> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .find(|r| {
                r.purpose == purpose
                    && r.code == code
                    && target.map_or(true, |t| r.target == t)
                    && !r.is_expired_at(now)
            })
            .cloned())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() < before)
    }

    async fn delete_for_target(
        &self,
        purpose: VerificationPurpose,
        target: &str,
    ) -> DomainResult<u64> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| !(r.purpose == purpose && r.target == target));
        Ok((before - records.len()) as u64)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> DomainResult<u64> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| !r.is_expired_at(now));
        Ok((before - records.len()) as u64)
    }
}
