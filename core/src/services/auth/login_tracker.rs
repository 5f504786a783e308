//! In-memory login attempt tracking with escalating lockouts.
//!
//! Failures are keyed by (client address, account identifier) so one noisy
//! client cannot lock an account for everyone, and one client hammering many
//! accounts is tracked per account. State lives in process memory; a restart
//! forgets it, which the deployment accepts for this subsystem.
//!
//! Escalation: the 3rd failure locks for 2 minutes, the 4th for 5 minutes,
//! the 5th and every later failure for 30 minutes. Counts reset after a
//! 24-hour window, and a lapsed lock discards the whole entry, so the next
//! failure starts a fresh count.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use cc_shared::config::LockoutConfig;

/// Outcome of recording a failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureInfo {
    /// Attempts left before the next failure locks (never negative)
    pub remaining_attempts: u32,
    /// Lock applied by this failure, if it crossed a threshold
    pub lock_minutes: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct AttemptKey {
    address: String,
    identifier: String,
}

#[derive(Debug, Clone)]
struct AttemptEntry {
    count: u32,
    first_attempt: DateTime<Utc>,
    lock_until: Option<DateTime<Utc>>,
}

/// Tracks failed login attempts per (address, identifier) pair.
///
/// All state sits behind one mutex; every operation is a single lock
/// acquisition, so concurrent failures for the same pair serialize and each
/// sees the count its predecessor left.
pub struct LoginAttemptTracker {
    entries: Mutex<HashMap<AttemptKey, AttemptEntry>>,
    config: LockoutConfig,
}

impl LoginAttemptTracker {
    pub fn new(config: LockoutConfig) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            config,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(LockoutConfig::default())
    }

    /// Record a failed attempt and report the resulting state
    pub fn record_failure(&self, address: &str, identifier: &str) -> FailureInfo {
        self.record_failure_at(address, identifier, Utc::now())
    }

    pub(crate) fn record_failure_at(
        &self,
        address: &str,
        identifier: &str,
        now: DateTime<Utc>,
    ) -> FailureInfo {
        let key = AttemptKey {
            address: address.to_string(),
            identifier: identifier.to_string(),
        };

        let mut entries = self.entries.lock().unwrap();
        let entry = entries.entry(key).or_insert(AttemptEntry {
            count: 0,
            first_attempt: now,
            lock_until: None,
        });

        if Self::is_stale(entry, now, &self.config) {
            *entry = AttemptEntry {
                count: 0,
                first_attempt: now,
                lock_until: None,
            };
        }

        entry.count += 1;
        let lock_minutes = self.lock_for_count(entry.count);
        if let Some(minutes) = lock_minutes {
            entry.lock_until = Some(now + Duration::minutes(minutes));
            warn!(
                address,
                count = entry.count,
                lock_minutes = minutes,
                "login failures crossed lockout threshold"
            );
        } else {
            debug!(address, count = entry.count, "failed login attempt recorded");
        }

        FailureInfo {
            remaining_attempts: self.config.max_attempts.saturating_sub(entry.count),
            lock_minutes,
        }
    }

    /// Whether the pair is currently locked out
    pub fn is_locked(&self, address: &str, identifier: &str) -> bool {
        self.is_locked_at(address, identifier, Utc::now())
    }

    pub(crate) fn is_locked_at(
        &self,
        address: &str,
        identifier: &str,
        now: DateTime<Utc>,
    ) -> bool {
        self.with_live_entry(address, identifier, now, |entry| {
            entry.lock_until.map_or(false, |until| until > now)
        })
        .unwrap_or(false)
    }

    /// Time left on an active lock, if any
    pub fn locked_for(&self, address: &str, identifier: &str) -> Option<Duration> {
        self.locked_for_at(address, identifier, Utc::now())
    }

    pub(crate) fn locked_for_at(
        &self,
        address: &str,
        identifier: &str,
        now: DateTime<Utc>,
    ) -> Option<Duration> {
        self.with_live_entry(address, identifier, now, |entry| {
            entry
                .lock_until
                .filter(|until| *until > now)
                .map(|until| until - now)
        })
        .flatten()
    }

    /// Current failure count for the pair (0 when untracked or stale)
    pub fn failure_count(&self, address: &str, identifier: &str) -> u32 {
        self.failure_count_at(address, identifier, Utc::now())
    }

    pub(crate) fn failure_count_at(
        &self,
        address: &str,
        identifier: &str,
        now: DateTime<Utc>,
    ) -> u32 {
        self.with_live_entry(address, identifier, now, |entry| entry.count)
            .unwrap_or(0)
    }

    /// Clear state for the pair after a successful login
    pub fn reset(&self, address: &str, identifier: &str) {
        let key = AttemptKey {
            address: address.to_string(),
            identifier: identifier.to_string(),
        };
        self.entries.lock().unwrap().remove(&key);
    }

    /// Drop stale entries; returns the count removed.
    ///
    /// Reads already self-heal, so the sweep only bounds memory growth.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Utc::now())
    }

    pub(crate) fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|_, entry| !Self::is_stale(entry, now, &self.config));
        before - entries.len()
    }

    /// Number of tracked pairs
    pub fn tracked_pairs(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Look up the entry for a pair, discarding it first if stale.
    fn with_live_entry<T>(
        &self,
        address: &str,
        identifier: &str,
        now: DateTime<Utc>,
        f: impl FnOnce(&AttemptEntry) -> T,
    ) -> Option<T> {
        let key = AttemptKey {
            address: address.to_string(),
            identifier: identifier.to_string(),
        };
        let mut entries = self.entries.lock().unwrap();
        let stale = entries
            .get(&key)
            .map(|entry| Self::is_stale(entry, now, &self.config));
        match stale {
            Some(true) => {
                entries.remove(&key);
                None
            }
            Some(false) => entries.get(&key).map(f),
            None => None,
        }
    }

    /// An entry is stale once its window has expired or its lock has lapsed
    fn is_stale(entry: &AttemptEntry, now: DateTime<Utc>, config: &LockoutConfig) -> bool {
        if now - entry.first_attempt >= Duration::hours(config.window_hours) {
            return true;
        }
        entry.lock_until.map_or(false, |until| until <= now)
    }

    fn lock_for_count(&self, count: u32) -> Option<i64> {
        if count >= self.config.max_attempts {
            Some(self.config.long_lock_minutes)
        } else if count == self.config.max_attempts - 1 {
            Some(self.config.medium_lock_minutes)
        } else if count == self.config.max_attempts - 2 {
            Some(self.config.short_lock_minutes)
        } else {
            None
        }
    }
}
