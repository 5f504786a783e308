//! In-memory comparison-count provider for tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};

use super::ComparisonRepository;

/// In-memory [`ComparisonRepository`] with per-user counts
#[derive(Default, Clone)]
pub struct MockComparisonRepository {
    pub counts: Arc<Mutex<HashMap<Uuid, u32>>>,
    /// When set, `count_active` fails with an internal error
    pub fail: Arc<Mutex<bool>>,
}

impl MockComparisonRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_count(&self, user_id: Uuid, count: u32) {
        self.counts.lock().unwrap().insert(user_id, count);
    }

    pub fn set_fail(&self, fail: bool) {
        *self.fail.lock().unwrap() = fail;
    }
}

#[async_trait]
impl ComparisonRepository for MockComparisonRepository {
    async fn count_active(&self, user_id: Uuid) -> DomainResult<u32> {
        if *self.fail.lock().unwrap() {
            return Err(DomainError::Internal {
                message: "mock comparison repository failure".to_string(),
            });
        }
        Ok(self.counts.lock().unwrap().get(&user_id).copied().unwrap_or(0))
    }
}
