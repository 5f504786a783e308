//! Verification code lifecycle: generation, issuance, redemption and sweeps.

mod code_generator;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use code_generator::{CodeGenerator, MAX_GENERATION_ATTEMPTS};
pub use service::VerificationService;
pub use traits::{EmailSenderTrait, SmsSenderTrait};
pub use types::SendCodeResult;
