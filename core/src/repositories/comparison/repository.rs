//! Comparison-list count provider.
//!
//! The account subsystem only needs one fact from the comparison domain: how
//! many active comparison lists a user owns, snapshotted into access tokens.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainResult;

/// Read access to a user's comparison lists
#[async_trait]
pub trait ComparisonRepository: Send + Sync {
    /// Number of active comparison lists owned by the user
    async fn count_active(&self, user_id: Uuid) -> DomainResult<u32>;
}
