//! Twilio SMS sender.
//!
//! Talks to the Twilio Messages API directly over HTTPS with basic auth.
//! Phone numbers are masked in every log line.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, info};

use cc_core::services::verification::SmsSenderTrait;
use cc_shared::utils::mask_phone_number;

use crate::InfrastructureError;

const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// Twilio credentials and sender number
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio account SID
    pub account_sid: String,
    /// Twilio auth token
    pub auth_token: String,
    /// Sending number in E.164 format
    pub from_number: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl TwilioConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let account_sid = std::env::var("TWILIO_ACCOUNT_SID")
            .map_err(|_| InfrastructureError::Config("TWILIO_ACCOUNT_SID not set".to_string()))?;
        let auth_token = std::env::var("TWILIO_AUTH_TOKEN")
            .map_err(|_| InfrastructureError::Config("TWILIO_AUTH_TOKEN not set".to_string()))?;
        let from_number = std::env::var("TWILIO_FROM_NUMBER")
            .map_err(|_| InfrastructureError::Config("TWILIO_FROM_NUMBER not set".to_string()))?;

        if !from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "TWILIO_FROM_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        Ok(Self {
            account_sid,
            auth_token,
            from_number,
            request_timeout_secs: std::env::var("TWILIO_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        })
    }
}

#[derive(Deserialize)]
struct MessageResponse {
    sid: String,
}

/// Production [`SmsSenderTrait`] backed by the Twilio Messages API
pub struct TwilioSmsSender {
    client: Client,
    config: TwilioConfig,
}

impl TwilioSmsSender {
    pub fn new(config: TwilioConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| InfrastructureError::Sms(format!("HTTP client build failed: {}", e)))?;

        info!(
            from = %mask_phone_number(&config.from_number),
            "Twilio SMS sender initialized"
        );
        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(TwilioConfig::from_env()?)
    }
}

#[async_trait]
impl SmsSenderTrait for TwilioSmsSender {
    async fn send_sms(&self, phone: &str, message: &str) -> Result<String, String> {
        let url = format!(
            "{}/Accounts/{}/Messages.json",
            TWILIO_API_BASE, self.config.account_sid
        );

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[
                ("To", phone),
                ("From", self.config.from_number.as_str()),
                ("Body", message),
            ])
            .send()
            .await
            .map_err(|e| format!("Twilio request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                to = %mask_phone_number(phone),
                %status,
                "Twilio rejected the message"
            );
            return Err(format!("Twilio returned {}: {}", status, body));
        }

        let message: MessageResponse = response
            .json()
            .await
            .map_err(|e| format!("Twilio response parse failed: {}", e))?;

        info!(
            to = %mask_phone_number(phone),
            sid = %message.sid,
            "SMS accepted by Twilio"
        );
        Ok(message.sid)
    }
}
