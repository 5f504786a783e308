//! Periodic hygiene sweeps.
//!
//! Two schedules run here: a daily sweep of expired verification records at
//! 02:00 local time, and an hourly sweep of stale login-attempt entries.
//! Neither sweep affects correctness (expiry is enforced at read time and
//! tracker reads self-heal); they only reclaim storage and memory. A failed
//! cycle is logged and the schedule continues.

use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Local, NaiveTime};
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep, Duration};
use tracing::{error, info};

use cc_core::repositories::VerificationRepository;
use cc_core::services::auth::LoginAttemptTracker;
use cc_core::services::verification::{EmailSenderTrait, SmsSenderTrait, VerificationService};

/// Maintenance schedule configuration
#[derive(Debug, Clone)]
pub struct MaintenanceConfig {
    /// Local wall-clock time of the daily verification sweep
    pub verification_sweep_time: NaiveTime,
    /// Seconds between tracker sweeps
    pub tracker_sweep_interval_secs: u64,
    /// Whether the background tasks run at all
    pub enabled: bool,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            verification_sweep_time: NaiveTime::from_hms_opt(2, 0, 0)
                .unwrap_or(NaiveTime::MIN),
            tracker_sweep_interval_secs: 3600,
            enabled: true,
        }
    }
}

/// Owns the background sweep tasks
pub struct MaintenanceService<V, S, E>
where
    V: VerificationRepository + 'static,
    S: SmsSenderTrait + 'static,
    E: EmailSenderTrait + 'static,
{
    verification_service: Arc<VerificationService<V, S, E>>,
    attempt_tracker: Arc<LoginAttemptTracker>,
    config: MaintenanceConfig,
}

impl<V, S, E> MaintenanceService<V, S, E>
where
    V: VerificationRepository + 'static,
    S: SmsSenderTrait + 'static,
    E: EmailSenderTrait + 'static,
{
    pub fn new(
        verification_service: Arc<VerificationService<V, S, E>>,
        attempt_tracker: Arc<LoginAttemptTracker>,
        config: MaintenanceConfig,
    ) -> Self {
        Self {
            verification_service,
            attempt_tracker,
            config,
        }
    }

    /// Spawn both sweep loops; the returned handles abort on drop at shutdown
    pub fn start(&self) -> Vec<JoinHandle<()>> {
        if !self.config.enabled {
            info!("maintenance tasks disabled");
            return Vec::new();
        }
        vec![self.spawn_verification_sweep(), self.spawn_tracker_sweep()]
    }

    fn spawn_verification_sweep(&self) -> JoinHandle<()> {
        let service = Arc::clone(&self.verification_service);
        let sweep_time = self.config.verification_sweep_time;

        tokio::spawn(async move {
            loop {
                let wait = duration_until_local(sweep_time);
                info!(
                    next_in_secs = wait.as_secs(),
                    "verification sweep scheduled"
                );
                sleep(wait).await;

                match service.sweep_expired().await {
                    Ok(removed) => {
                        info!(removed, "daily verification sweep finished");
                    }
                    Err(e) => {
                        error!(error = %e, "verification sweep failed; will retry tomorrow");
                    }
                }
            }
        })
    }

    fn spawn_tracker_sweep(&self) -> JoinHandle<()> {
        let tracker = Arc::clone(&self.attempt_tracker);
        let period = Duration::from_secs(self.config.tracker_sweep_interval_secs);

        tokio::spawn(async move {
            let mut ticker = interval(period);
            // The immediate first tick would sweep an empty tracker
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = tracker.sweep();
                if removed > 0 {
                    info!(removed, "swept stale login-attempt entries");
                }
            }
        })
    }
}

/// Time until the next local occurrence of `target`
fn duration_until_local(target: NaiveTime) -> Duration {
    let now = Local::now();
    let today_target = now
        .date_naive()
        .and_time(target)
        .and_local_timezone(Local)
        .earliest();

    let next = match today_target {
        Some(t) if t > now => t,
        // Past today's slot (or an ambiguous DST instant): aim for tomorrow
        _ => {
            let tomorrow = now.date_naive() + ChronoDuration::days(1);
            tomorrow
                .and_time(target)
                .and_local_timezone(Local)
                .earliest()
                .unwrap_or(now + ChronoDuration::days(1))
        }
    };

    (next - now)
        .to_std()
        .unwrap_or_else(|_| std::time::Duration::from_secs(60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_duration_until_local_is_within_a_day() {
        let now = Local::now();
        let in_an_hour = now.time().with_nanosecond(0).unwrap_or(now.time())
            + ChronoDuration::hours(1);
        let wait = duration_until_local(in_an_hour);
        assert!(wait.as_secs() <= 24 * 3600);
    }
}
