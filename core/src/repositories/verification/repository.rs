//! Verification record repository trait.
//!
//! Expiry is enforced at read time: lookups take the caller's `now` and never
//! return a record whose expiry has passed, whether or not a background sweep
//! has removed it yet. Each service operation reads the clock once and passes
//! that single instant to every query it makes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::{VerificationPurpose, VerificationRecord};
use crate::errors::DomainResult;

/// Persistence operations for verification records
#[async_trait]
pub trait VerificationRepository: Send + Sync {
    /// Persist a new record
    async fn create(&self, record: VerificationRecord) -> DomainResult<()>;

    /// Find an unexpired record carrying this code under the purpose,
    /// regardless of target. Used for collision checks at generation time.
    async fn find_active_by_code(
        &self,
        purpose: VerificationPurpose,
        code: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<VerificationRecord>>;

    /// Find the unexpired record to redeem: purpose and code must match, and
    /// so must the target when one is supplied.
    async fn find_for_redeem(
        &self,
        purpose: VerificationPurpose,
        code: &str,
        target: Option<&str>,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<VerificationRecord>>;

    /// Delete a record by id; returns whether it existed
    async fn delete(&self, id: Uuid) -> DomainResult<bool>;

    /// Delete every record for a (purpose, target) pair; returns the count
    /// removed
    async fn delete_for_target(
        &self,
        purpose: VerificationPurpose,
        target: &str,
    ) -> DomainResult<u64>;

    /// Delete every record whose expiry has passed; returns the count removed
    async fn delete_expired(&self, now: DateTime<Utc>) -> DomainResult<u64>;
}
