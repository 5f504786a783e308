//! Verification record repository trait and mock implementation

mod mock;
mod repository;

pub use mock::MockVerificationRepository;
pub use repository::VerificationRepository;
