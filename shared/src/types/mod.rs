//! Common type definitions shared between core and the boundary layer

mod response;

pub use response::ErrorResponse;
