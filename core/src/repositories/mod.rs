//! Repository traits abstracting persistence.
//!
//! Implementations live in the infrastructure crate; in-memory mocks are
//! provided here for tests and local development.

pub mod comparison;
pub mod user;
pub mod verification;

pub use comparison::ComparisonRepository;
pub use user::UserRepository;
pub use verification::VerificationRepository;

pub use comparison::MockComparisonRepository;
pub use user::MockUserRepository;
pub use verification::MockVerificationRepository;
