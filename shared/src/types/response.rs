//! Error response structure rendered at the boundary layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unified error response for API consumers
///
/// Domain errors are constructed with an explicit status classification and
/// propagate unchanged to the boundary layer, which renders them uniformly
/// through this structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g. `TOO_MANY_ATTEMPTS`)
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP-class status the error maps to
    pub status: u16,

    /// The offending field for field-scoped validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,

    /// Minutes until the caller may retry, for rate-limited errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_minutes: Option<u32>,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl ToString, message: impl ToString, status: u16) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            status,
            field: None,
            retry_after_minutes: None,
            timestamp: Utc::now(),
        }
    }

    /// Scope the error to a specific input field
    pub fn with_field(mut self, field: impl ToString) -> Self {
        self.field = Some(field.to_string());
        self
    }

    /// Attach retry-after information for rate-limited errors
    pub fn with_retry_after_minutes(mut self, minutes: u32) -> Self {
        self.retry_after_minutes = Some(minutes);
        self
    }
}
