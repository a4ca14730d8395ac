//! Background sweep for the rate limit registry.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use limitra_application::RateLimitService;

/// Default sweep cadence.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Spawns a task that periodically drops expired entries from the registry.
///
/// The sweep only bounds registry growth; limiter decisions do not depend on
/// it running, so the hosting runtime may skip it or pick any cadence. The
/// returned handle can be aborted at shutdown.
pub fn spawn_rate_limit_sweeper(service: RateLimitService, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            // The first tick completes immediately.
            ticker.tick().await;
            service.cleanup_expired().await;
        }
    })
}
