//! Log-only email sender for local development

use async_trait::async_trait;
use tracing::info;

use cc_core::services::verification::EmailSenderTrait;

/// Development [`EmailSenderTrait`] that logs instead of sending
#[derive(Debug, Default)]
pub struct MockEmailSender;

impl MockEmailSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailSenderTrait for MockEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), String> {
        info!(to, subject, "mock email (not sent)");
        info!("{}", body);
        Ok(())
    }
}
