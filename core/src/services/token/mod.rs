//! JWT issuance and validation

mod service;

#[cfg(test)]
mod tests;

pub use service::TokenService;
