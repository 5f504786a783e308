//! SMS delivery implementations

mod mock;
mod twilio;

pub use mock::MockSmsSender;
pub use twilio::{TwilioConfig, TwilioSmsSender};
