//! Runs the account stack locally with in-memory stores and log-only
//! senders, then walks through a registration and login.
//!
//! ```sh
//! cargo run -p cc_infra --example local_stack
//! ```

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use cc_core::repositories::{
    MockComparisonRepository, MockUserRepository, MockVerificationRepository,
};
use cc_core::services::auth::{AuthService, AuthServiceConfig, LoginAttemptTracker, RegisterRequest};
use cc_core::services::token::TokenService;
use cc_core::services::verification::VerificationService;
use cc_infra::tasks::MaintenanceConfig;
use cc_infra::{BcryptPasswordHasher, MaintenanceService, MockEmailSender, MockSmsSender};
use cc_shared::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let verification_service = Arc::new(VerificationService::new(
        Arc::new(MockVerificationRepository::new()),
        Arc::new(MockSmsSender::new()),
        Arc::new(MockEmailSender::new()),
    ));
    let tracker = Arc::new(LoginAttemptTracker::new(config.lockout.clone()));
    let token_service = Arc::new(TokenService::new(
        Arc::new(MockComparisonRepository::new()),
        config.auth.jwt.clone(),
    ));
    let auth = AuthService::new(
        Arc::new(MockUserRepository::new()),
        Arc::clone(&verification_service),
        Arc::clone(&token_service),
        Arc::clone(&tracker),
        Arc::new(BcryptPasswordHasher::new()),
        AuthServiceConfig::default(),
    );

    let maintenance = MaintenanceService::new(
        Arc::clone(&verification_service),
        Arc::clone(&tracker),
        MaintenanceConfig::default(),
    );
    let _handles = maintenance.start();

    // Registration: the "SMS" code lands in the log via the mock sender
    let phone = "+886987002093";
    let sent = auth.send_phone_code(phone).await?;
    let registered = auth
        .register(RegisterRequest {
            name: "Demo Student".to_string(),
            phone: phone.to_string(),
            email: "demo@example.edu".to_string(),
            password: "demo-password-123".to_string(),
            verification_code: sent.record.code,
        })
        .await?;
    tracing::info!(user_id = %registered.user.id, "registered");

    let login = auth.login("127.0.0.1", phone, "demo-password-123").await?;
    let claims = token_service.verify_access_token(&login.tokens.access_token)?;
    tracing::info!(
        sub = %claims.sub,
        comparison_count = claims.comparison_count,
        expires_in = login.tokens.expires_in,
        "logged in"
    );

    let refreshed = auth.refresh_token(Some(&login.tokens.refresh_token)).await?;
    tracing::info!(expires_in = refreshed.expires_in, "access token refreshed");

    Ok(())
}
