//! SMTP email sender built on lettre's async transport

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use cc_core::services::verification::EmailSenderTrait;

use crate::InfrastructureError;

/// SMTP relay configuration
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
    pub from_name: String,
    /// One of `tls`, `starttls` or `none`
    pub encryption: String,
}

impl SmtpConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let host = std::env::var("SMTP_HOST")
            .map_err(|_| InfrastructureError::Config("SMTP_HOST not set".to_string()))?;
        let port = std::env::var("SMTP_PORT")
            .unwrap_or_else(|_| "587".to_string())
            .parse()
            .map_err(|_| InfrastructureError::Config("Invalid SMTP_PORT".to_string()))?;
        let username = std::env::var("SMTP_USERNAME")
            .map_err(|_| InfrastructureError::Config("SMTP_USERNAME not set".to_string()))?;
        let password = std::env::var("SMTP_PASSWORD")
            .map_err(|_| InfrastructureError::Config("SMTP_PASSWORD not set".to_string()))?;
        let from_email = std::env::var("SMTP_FROM_EMAIL")
            .map_err(|_| InfrastructureError::Config("SMTP_FROM_EMAIL not set".to_string()))?;

        Ok(Self {
            host,
            port,
            username,
            password,
            from_email,
            from_name: std::env::var("SMTP_FROM_NAME")
                .unwrap_or_else(|_| "CampusCompare".to_string()),
            encryption: std::env::var("SMTP_ENCRYPTION")
                .unwrap_or_else(|_| "starttls".to_string()),
        })
    }
}

/// Production [`EmailSenderTrait`] backed by an SMTP relay
pub struct SmtpEmailSender {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpEmailSender {
    pub fn new(config: SmtpConfig) -> Result<Self, InfrastructureError> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let mailer = match config.encryption.to_lowercase().as_str() {
            "tls" => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| InfrastructureError::Email(format!("SMTP relay error: {}", e)))?
                .port(config.port)
                .credentials(credentials)
                .build(),
            "starttls" => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| InfrastructureError::Email(format!("SMTP starttls error: {}", e)))?
                .port(config.port)
                .credentials(credentials)
                .build(),
            "none" => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                .port(config.port)
                .credentials(credentials)
                .build(),
            other => {
                return Err(InfrastructureError::Config(format!(
                    "Invalid SMTP_ENCRYPTION value: {}. Use 'tls', 'starttls', or 'none'",
                    other
                )))
            }
        };

        let from = format!("{} <{}>", config.from_name, config.from_email);
        info!(host = %config.host, "SMTP email sender initialized");
        Ok(Self { mailer, from })
    }

    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(SmtpConfig::from_env()?)
    }
}

#[async_trait]
impl EmailSenderTrait for SmtpEmailSender {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), String> {
        let message = Message::builder()
            .from(
                self.from
                    .parse()
                    .map_err(|e| format!("invalid from address: {}", e))?,
            )
            .to(to.parse().map_err(|e| format!("invalid to address: {}", e))?)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| format!("message build failed: {}", e))?;

        self.mailer
            .send(message)
            .await
            .map_err(|e| format!("SMTP send failed: {}", e))?;

        info!(to, subject, "email dispatched");
        Ok(())
    }
}
