//! Utility functions shared across server modules

pub mod validation;

pub use validation::{is_valid_email, is_valid_phone, mask_phone_number};
