//! Comparison-list repository trait and mock implementation

mod mock;
mod repository;

pub use mock::MockComparisonRepository;
pub use repository::ComparisonRepository;
