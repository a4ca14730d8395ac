use std::sync::Arc;

use chrono::TimeDelta;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use limitra_domain::{LimitCheck, RateLimitEntry, RateLimitRegistry};

use super::config::RateLimitConfig;
use super::ports::{Clock, RateLimitStore};

/// Application service deciding, per key, whether an attempt may proceed.
///
/// Holds the registry in memory and mirrors every mutation into the durable
/// store. Construct one instance at startup and share clones; all clones
/// operate on the same registry. Storage failures never surface through the
/// public operations (see [`RateLimitService::load`]).
#[derive(Clone)]
pub struct RateLimitService {
    store: Arc<dyn RateLimitStore>,
    clock: Arc<dyn Clock>,
    entries: Arc<RwLock<RateLimitRegistry>>,
}

impl RateLimitService {
    /// Creates the service and restores the registry from the durable store.
    ///
    /// A failed or unreadable load is logged and treated as an empty
    /// registry; the limiter then runs in-memory for the session.
    pub async fn load(store: Arc<dyn RateLimitStore>, clock: Arc<dyn Clock>) -> Self {
        let entries = match store.load().await {
            Ok(Some(entries)) => entries,
            Ok(None) => RateLimitRegistry::new(),
            Err(error) => {
                warn!(error = %error, "failed to load persisted rate limit state");
                RateLimitRegistry::new()
            }
        };

        Self {
            store,
            clock,
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    /// Decides whether an attempt for `key` is currently permitted.
    ///
    /// `remaining` anticipates the attempt the caller is about to make:
    /// callers follow an allowed check with
    /// [`record_attempt`](Self::record_attempt) on failure paths and
    /// [`reset`](Self::reset) once the action succeeds. The limiter cannot
    /// enforce that convention itself. Expired blocks and expired windows
    /// encountered here are dropped from the registry.
    pub async fn check_limit(&self, key: &str, config: &RateLimitConfig) -> LimitCheck {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;

        let Some(entry) = entries.get(key) else {
            return LimitCheck::fresh(config.max_attempts);
        };

        if let Some(deadline) = entry.blocked_until {
            if deadline > now {
                return LimitCheck::blocked(deadline);
            }

            // The cooldown has fully elapsed: the key starts over.
            entries.remove(key);
            self.persist(&entries).await;
            return LimitCheck::fresh(config.max_attempts);
        }

        if entry.window_expired(now, config.window) {
            entries.remove(key);
            self.persist(&entries).await;
            return LimitCheck::fresh(config.max_attempts);
        }

        let remaining = config.max_attempts.saturating_sub(entry.attempts);
        if remaining == 0 {
            return LimitCheck::window_exhausted(entry.first_attempt_time + config.window);
        }

        LimitCheck::allowed(remaining - 1)
    }

    /// Records one failed attempt for `key`.
    ///
    /// Successful actions are not recorded; call [`reset`](Self::reset) for
    /// those instead so they do not consume budget. Crossing
    /// `max_attempts` sets the block deadline, extending any block already
    /// in force.
    pub async fn record_attempt(&self, key: &str, config: &RateLimitConfig) {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;

        match entries.get_mut(key) {
            Some(entry) if !entry.window_expired(now, config.window) => {
                entry.attempts += 1;
                if entry.attempts >= config.max_attempts {
                    entry.blocked_until = Some(now + config.block_duration);
                }
            }
            // Missing or window-expired: a fresh window starts, discarding
            // any stale block deadline with it.
            _ => {
                entries.insert(key.to_owned(), RateLimitEntry::first_attempt(now));
            }
        }

        self.persist(&entries).await;
    }

    /// Clears all tracked state for `key`.
    pub async fn reset(&self, key: &str) {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        self.persist(&entries).await;
    }

    /// Returns the time left on an active block for `key`.
    ///
    /// `None` while no block is in force, even when unexpired attempt-count
    /// state exists. Intended for countdown display, not for gating.
    pub async fn remaining_block_time(&self, key: &str) -> Option<TimeDelta> {
        let now = self.clock.now();
        let entries = self.entries.read().await;

        entries
            .get(key)?
            .blocked_until
            .map(|deadline| deadline - now)
            .filter(|remaining| *remaining > TimeDelta::zero())
    }

    /// Removes entries whose block has expired, or whose window has expired
    /// with no block in force, and reports how many were dropped.
    ///
    /// Windows are judged against the default window because per-key configs
    /// are not stored. Safe to run at any cadence, or never; it only bounds
    /// registry growth.
    pub async fn cleanup_expired(&self) -> usize {
        let now = self.clock.now();
        let default_window = RateLimitConfig::default().window;
        let mut entries = self.entries.write().await;

        let before = entries.len();
        entries.retain(|_, entry| match entry.blocked_until {
            Some(deadline) => deadline >= now,
            None => !entry.window_expired(now, default_window),
        });
        let removed = before - entries.len();

        if removed > 0 {
            debug!(removed, "removed expired rate limit entries");
            self.persist(&entries).await;
        }

        removed
    }

    async fn persist(&self, entries: &RateLimitRegistry) {
        if let Err(error) = self.store.save(entries).await {
            warn!(error = %error, "failed to persist rate limit state");
        }
    }
}
