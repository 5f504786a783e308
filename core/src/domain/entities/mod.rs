//! Domain entities representing core business objects.

pub mod token;
pub mod user;
pub mod verification;

// Re-export commonly used types
pub use token::{
    AccessClaims, RefreshClaims, TokenPair, ACCESS_TOKEN_EXPIRY_MINUTES, REFRESH_TOKEN_EXPIRY_DAYS,
};
pub use user::{PublicUser, User};
pub use verification::{
    CodeShape, PurposePolicy, VerificationPurpose, VerificationRecord, LINK_TOKEN_BYTES,
    PHONE_CODE_LENGTH,
};
