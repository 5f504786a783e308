//! Login lockout policy configuration

use serde::{Deserialize, Serialize};

/// Escalating lockout policy for failed login attempts
///
/// The first two failures are tolerated without penalty (typos). The third
/// failure introduces a short cool-down against rapid automated guessing,
/// and repeated failures escalate sharply to deter sustained brute force.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LockoutConfig {
    /// Number of attempts reported to the caller as the allowance
    pub max_attempts: u32,

    /// Lock duration in minutes at the third failure
    pub short_lock_minutes: i64,

    /// Lock duration in minutes at the fourth failure
    pub medium_lock_minutes: i64,

    /// Lock duration in minutes at the fifth and every later failure
    pub long_lock_minutes: i64,

    /// Hours after the first failure at which an entry expires regardless
    /// of lock state
    pub window_hours: i64,

    /// Interval in seconds between memory-hygiene sweeps of the tracker
    pub sweep_interval_seconds: u64,
}

impl Default for LockoutConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            short_lock_minutes: 2,
            medium_lock_minutes: 5,
            long_lock_minutes: 30,
            window_hours: 24,
            sweep_interval_seconds: 3600, // hourly
        }
    }
}
