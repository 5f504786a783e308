//! Verification code generation.
//!
//! Codes come from the OS random source. Phone codes are six decimal digits;
//! link codes are URL-safe base64 tokens. A freshly generated code is checked
//! against active records under the same purpose so that two outstanding
//! codes can never collide.

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::{Rng, RngCore};
use tracing::warn;

use crate::domain::entities::{CodeShape, VerificationPurpose, LINK_TOKEN_BYTES};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::VerificationRepository;

/// Retries before giving up on finding a collision-free code
pub const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Generates collision-free verification codes for a purpose
pub struct CodeGenerator<V: VerificationRepository> {
    repository: Arc<V>,
}

impl<V: VerificationRepository> CodeGenerator<V> {
    pub fn new(repository: Arc<V>) -> Self {
        Self { repository }
    }

    /// Generate a code that no active record under `purpose` already uses.
    ///
    /// `now` is the operation's clock reading; expiry checks during the
    /// collision probe use the same instant as the rest of the operation.
    pub async fn generate(
        &self,
        purpose: VerificationPurpose,
        now: DateTime<Utc>,
    ) -> DomainResult<String> {
        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let code = match purpose.policy().code_shape {
                CodeShape::NumericSixDigit => Self::numeric_code(),
                CodeShape::UrlSafeToken => Self::link_token(),
            };

            match self
                .repository
                .find_active_by_code(purpose, &code, now)
                .await?
            {
                None => return Ok(code),
                Some(_) => {
                    warn!(
                        purpose = %purpose,
                        attempt,
                        "generated code collided with an active code"
                    );
                }
            }
        }

        Err(DomainError::Internal {
            message: format!(
                "could not generate a unique verification code after {} attempts",
                MAX_GENERATION_ATTEMPTS
            ),
        })
    }

    /// Uniformly random six-digit code (100000..=999999, no leading zeros)
    fn numeric_code() -> String {
        OsRng.gen_range(100_000..=999_999).to_string()
    }

    /// URL-safe token from `LINK_TOKEN_BYTES` random bytes
    fn link_token() -> String {
        let mut bytes = [0u8; LINK_TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        URL_SAFE_NO_PAD.encode(bytes)
    }
}
