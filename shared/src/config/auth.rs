//! Authentication and token configuration

use serde::{Deserialize, Serialize};

/// JWT authentication configuration
///
/// Access and refresh tokens are signed with distinct secrets so that a
/// leaked access secret cannot be used to mint refresh tokens.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret key for signing access tokens
    pub access_secret: String,

    /// Secret key for signing refresh tokens
    pub refresh_secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: String::from("access-secret-change-in-production"),
            refresh_secret: String::from("refresh-secret-change-in-production"),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
            issuer: String::from("campus-compare"),
            audience: String::from("campus-compare-api"),
        }
    }
}

impl JwtConfig {
    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Check if either secret is still a default value (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.access_secret == "access-secret-change-in-production"
            || self.refresh_secret == "refresh-secret-change-in-production"
    }
}

/// Refresh-token cookie configuration
///
/// The refresh token is delivered exclusively through this cookie; it never
/// appears in a JSON response body. The boundary layer reads these attributes
/// when setting and clearing the cookie.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Cookie name
    pub name: String,

    /// Cookie HttpOnly flag
    pub http_only: bool,

    /// Cookie SameSite attribute
    pub same_site: String,

    /// Cookie secure flag (HTTPS only)
    pub secure: bool,

    /// Cookie path, scoped to the auth endpoints
    pub path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: String::from("refresh_token"),
            http_only: true,
            same_site: String::from("Strict"),
            secure: false, // Set to true in production
            path: String::from("/api/auth"),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Refresh-token cookie configuration
    #[serde(default)]
    pub cookie: CookieConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let access_secret = std::env::var("JWT_ACCESS_SECRET")
            .unwrap_or_else(|_| "access-secret-change-in-production".to_string());
        let refresh_secret = std::env::var("JWT_REFRESH_SECRET")
            .unwrap_or_else(|_| "refresh-secret-change-in-production".to_string());
        let access_token_expiry = std::env::var("JWT_ACCESS_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "900".to_string())
            .parse()
            .unwrap_or(900);
        let refresh_token_expiry = std::env::var("JWT_REFRESH_TOKEN_EXPIRY")
            .unwrap_or_else(|_| "604800".to_string())
            .parse()
            .unwrap_or(604800);

        Self {
            jwt: JwtConfig {
                access_secret,
                refresh_secret,
                access_token_expiry,
                refresh_token_expiry,
                issuer: String::from("campus-compare"),
                audience: String::from("campus-compare-api"),
            },
            cookie: CookieConfig::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            cookie: CookieConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 604800);
        assert!(config.is_using_default_secret());
        assert_ne!(config.access_secret, config.refresh_secret);
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::default()
            .with_access_expiry_minutes(30)
            .with_refresh_expiry_days(14);

        assert_eq!(config.access_token_expiry, 1800);
        assert_eq!(config.refresh_token_expiry, 1209600);
    }

    #[test]
    fn test_cookie_config_default() {
        let config = CookieConfig::default();
        assert_eq!(config.name, "refresh_token");
        assert!(config.http_only);
        assert_eq!(config.same_site, "Strict");
    }
}
