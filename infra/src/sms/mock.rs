//! Console-logging SMS sender for local development

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tracing::info;

use cc_core::services::verification::SmsSenderTrait;

/// Development [`SmsSenderTrait`] that logs instead of sending.
///
/// Lets the full registration flow run without Twilio credentials; the code
/// is read from the log output.
#[derive(Debug, Default)]
pub struct MockSmsSender {
    counter: AtomicU64,
}

impl MockSmsSender {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SmsSenderTrait for MockSmsSender {
    async fn send_sms(&self, phone: &str, message: &str) -> Result<String, String> {
        let id = self.counter.fetch_add(1, Ordering::Relaxed);
        info!(phone, message, "mock SMS (not sent)");
        Ok(format!("mock-sms-{}", id))
    }
}
