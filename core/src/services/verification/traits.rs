//! Outbound delivery channel traits.
//!
//! Implemented by the infrastructure crate (Twilio, SMTP) and by mocks in
//! tests. Senders report failure as a plain string; the service layer wraps
//! it into a delivery error.

use async_trait::async_trait;

/// SMS delivery channel
#[async_trait]
pub trait SmsSenderTrait: Send + Sync {
    /// Send a text message; returns the provider's message id
    async fn send_sms(&self, phone: &str, message: &str) -> Result<String, String>;
}

/// Email delivery channel
#[async_trait]
pub trait EmailSenderTrait: Send + Sync {
    /// Send a plain-text email
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), String>;
}
