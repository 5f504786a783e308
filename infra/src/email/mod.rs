//! Email delivery implementations

mod mock;
mod smtp;

pub use mock::MockEmailSender;
pub use smtp::{SmtpConfig, SmtpEmailSender};
