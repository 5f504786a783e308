//! Authentication orchestration: login, registration, token refresh and the
//! account verification flows.

mod config;
mod login_tracker;
mod password;
mod service;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use login_tracker::{FailureInfo, LoginAttemptTracker};
pub use password::PasswordHasherTrait;
pub use service::{AuthService, LoginResult, RefreshResult, RegisterRequest};
