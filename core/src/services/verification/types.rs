//! Result types for verification operations

use crate::domain::entities::VerificationRecord;

/// Outcome of issuing and dispatching a verification code
#[derive(Debug, Clone)]
pub struct SendCodeResult {
    /// The record that was stored
    pub record: VerificationRecord,
    /// Provider message id, when the channel reports one
    pub message_id: Option<String>,
}
