//! Verification purpose, policy and record entities.
//!
//! A verification record proves control of a contact channel. Each purpose
//! carries a compile-time policy describing how long its codes live, what
//! shape they take, and whether redemption must name the target the code was
//! issued for.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ValidationError;

/// Length of numeric codes sent over SMS
pub const PHONE_CODE_LENGTH: usize = 6;

/// Random bytes backing a URL-safe link token (base64 encodes to 32 chars)
pub const LINK_TOKEN_BYTES: usize = 24;

/// What a verification code looks like on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeShape {
    /// Six decimal digits, suitable for typing from an SMS
    NumericSixDigit,
    /// URL-safe base64 token, suitable for embedding in a link
    UrlSafeToken,
}

/// Per-purpose issuance and redemption policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurposePolicy {
    /// How long a code stays redeemable
    pub ttl_minutes: i64,
    /// Shape of generated codes
    pub code_shape: CodeShape,
    /// Whether redemption must supply the target the code was issued for
    pub target_bound_redeem: bool,
}

/// The channel or flow a verification record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationPurpose {
    Phone,
    Email,
    PasswordReset,
}

impl VerificationPurpose {
    /// The fixed policy for this purpose
    pub const fn policy(self) -> PurposePolicy {
        match self {
            Self::Phone => PurposePolicy {
                ttl_minutes: 3,
                code_shape: CodeShape::NumericSixDigit,
                target_bound_redeem: true,
            },
            Self::Email => PurposePolicy {
                ttl_minutes: 24 * 60,
                code_shape: CodeShape::UrlSafeToken,
                target_bound_redeem: false,
            },
            Self::PasswordReset => PurposePolicy {
                ttl_minutes: 30,
                code_shape: CodeShape::UrlSafeToken,
                target_bound_redeem: false,
            },
        }
    }

    /// Code lifetime as a duration
    pub fn ttl(self) -> Duration {
        Duration::minutes(self.policy().ttl_minutes)
    }

    /// Stable string form used in storage and logs
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::Email => "email",
            Self::PasswordReset => "password_reset",
        }
    }
}

impl fmt::Display for VerificationPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerificationPurpose {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "phone" => Ok(Self::Phone),
            "email" => Ok(Self::Email),
            "password_reset" => Ok(Self::PasswordReset),
            other => Err(ValidationError::InvalidPurpose {
                purpose: other.to_string(),
            }),
        }
    }
}

/// A single outstanding verification code.
///
/// At most one active record exists per (purpose, target) pair; issuing a
/// new code removes any predecessor. Records are deleted on redemption, so
/// every code is single-use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub id: Uuid,
    pub purpose: VerificationPurpose,
    /// Phone number or email address the code was issued for
    pub target: String,
    pub code: String,
    /// Owning account, when one exists at issuance time
    pub user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl VerificationRecord {
    /// Create a record expiring per the purpose policy, measured from `now`
    pub fn new(
        purpose: VerificationPurpose,
        target: impl Into<String>,
        code: impl Into<String>,
        user_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            purpose,
            target: target.into(),
            code: code.into(),
            user_id,
            created_at: now,
            expires_at: now + purpose.ttl(),
        }
    }

    /// Whether the record has expired as of `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
