//! MySQL repository implementations

mod comparison_repository;
mod user_repository;
mod verification_repository;

pub use comparison_repository::MySqlComparisonRepository;
pub use user_repository::MySqlUserRepository;
pub use verification_repository::MySqlVerificationRepository;
