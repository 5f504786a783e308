//! Token service: mints and validates access/refresh token pairs.
//!
//! The two token families are signed with distinct secrets, so an access
//! token can never pass refresh validation and vice versa. Validation
//! enforces signature, expiry, not-before, issuer and audience.

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, warn};
use uuid::Uuid;

use cc_shared::config::JwtConfig;

use crate::domain::entities::{AccessClaims, RefreshClaims, TokenPair};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::ComparisonRepository;

/// Issues and validates JWTs for the account subsystem
pub struct TokenService<P: ComparisonRepository> {
    comparisons: Arc<P>,
    config: JwtConfig,
    access_encoding_key: EncodingKey,
    access_decoding_key: DecodingKey,
    refresh_encoding_key: EncodingKey,
    refresh_decoding_key: DecodingKey,
    validation: Validation,
}

impl<P: ComparisonRepository> TokenService<P> {
    pub fn new(comparisons: Arc<P>, config: JwtConfig) -> Self {
        if config.is_using_default_secret() {
            warn!("JWT secrets are default values; set JWT_ACCESS_SECRET and JWT_REFRESH_SECRET");
        }

        let access_encoding_key = EncodingKey::from_secret(config.access_secret.as_bytes());
        let access_decoding_key = DecodingKey::from_secret(config.access_secret.as_bytes());
        let refresh_encoding_key = EncodingKey::from_secret(config.refresh_secret.as_bytes());
        let refresh_decoding_key = DecodingKey::from_secret(config.refresh_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.validate_nbf = true;

        Self {
            comparisons,
            config,
            access_encoding_key,
            access_decoding_key,
            refresh_encoding_key,
            refresh_decoding_key,
            validation,
        }
    }

    /// Access token lifetime in seconds, for response payloads
    pub fn access_expiry_seconds(&self) -> i64 {
        self.config.access_token_expiry
    }

    /// Mint an access token for the user.
    ///
    /// The comparison-list count is snapshotted into the claims at this
    /// moment. An unavailable count degrades to zero rather than failing the
    /// login.
    pub async fn issue_access_token(&self, user_id: Uuid, name: &str) -> DomainResult<String> {
        let comparison_count = match self.comparisons.count_active(user_id).await {
            Ok(count) => count,
            Err(e) => {
                warn!(
                    user_id = %user_id,
                    error = %e,
                    "comparison count unavailable; issuing token with 0"
                );
                0
            }
        };

        let claims = AccessClaims::new(
            user_id,
            name,
            comparison_count,
            Duration::seconds(self.config.access_token_expiry),
            &self.config.issuer,
            &self.config.audience,
        );

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.access_encoding_key,
        )
        .map_err(|e| {
            warn!(error = %e, "access token encoding failed");
            DomainError::from(TokenError::TokenGenerationFailed)
        })
    }

    /// Mint a refresh token for the user
    pub fn issue_refresh_token(&self, user_id: Uuid, name: &str) -> DomainResult<String> {
        let claims = RefreshClaims::new(
            user_id,
            name,
            Duration::seconds(self.config.refresh_token_expiry),
            &self.config.issuer,
            &self.config.audience,
        );

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.refresh_encoding_key,
        )
        .map_err(|e| {
            warn!(error = %e, "refresh token encoding failed");
            DomainError::from(TokenError::TokenGenerationFailed)
        })
    }

    /// Mint a full access/refresh pair, as returned on login
    pub async fn issue_token_pair(&self, user_id: Uuid, name: &str) -> DomainResult<TokenPair> {
        let access_token = self.issue_access_token(user_id, name).await?;
        let refresh_token = self.issue_refresh_token(user_id, name)?;
        debug!(user_id = %user_id, "token pair issued");
        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_expiry,
        ))
    }

    /// Validate an access token and return its claims
    pub fn verify_access_token(&self, token: &str) -> DomainResult<AccessClaims> {
        decode::<AccessClaims>(token, &self.access_decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let error = match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        TokenError::InvalidSignature
                    }
                    _ => TokenError::InvalidTokenFormat,
                };
                DomainError::from(error)
            })
    }

    /// Validate a refresh token and return its claims
    pub fn verify_refresh_token(&self, token: &str) -> DomainResult<RefreshClaims> {
        decode::<RefreshClaims>(token, &self.refresh_decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let error = match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        TokenError::RefreshTokenExpired
                    }
                    _ => TokenError::InvalidRefreshToken,
                };
                DomainError::from(error)
            })
    }
}
