//! Attempt tracking entities for the client-side rate limiter.
//!
//! One [`RateLimitEntry`] accumulates attempts for a key inside a sliding
//! window and carries the block deadline once the attempt threshold has been
//! crossed. The registry of entries is also the shape of the durable
//! snapshot.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Registry of tracked keys, in memory and in the persisted snapshot.
pub type RateLimitRegistry = HashMap<String, RateLimitEntry>;

/// Tracked attempt state for a single key.
///
/// Timestamps serialize as integer milliseconds since the epoch, so the
/// persisted form of an entry is `{"attempts": n, "firstAttemptTime": ms}`
/// with `blockedUntil` present only while a block deadline is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitEntry {
    /// Attempts recorded within the current window. Always at least 1.
    pub attempts: u32,
    /// When the first attempt of the current window happened.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub first_attempt_time: DateTime<Utc>,
    /// Deadline until which all attempts for the key are rejected.
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub blocked_until: Option<DateTime<Utc>>,
}

impl RateLimitEntry {
    /// Creates the entry for the first recorded attempt of a window.
    #[must_use]
    pub fn first_attempt(now: DateTime<Utc>) -> Self {
        Self {
            attempts: 1,
            first_attempt_time: now,
            blocked_until: None,
        }
    }

    /// Whether a block deadline is set and still in the future.
    #[must_use]
    pub fn block_active(&self, now: DateTime<Utc>) -> bool {
        self.blocked_until.is_some_and(|deadline| deadline > now)
    }

    /// Whether the counting window has elapsed.
    #[must_use]
    pub fn window_expired(&self, now: DateTime<Utc>, window: TimeDelta) -> bool {
        now - self.first_attempt_time > window
    }
}

/// Outcome of a limit check for one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitCheck {
    /// Whether the caller may proceed with the attempt.
    pub allowed: bool,
    /// Attempts left after the one the caller is about to make.
    pub remaining: u32,
    /// When the counting window resets; reported while the window budget is
    /// exhausted without a block.
    pub reset_at: Option<DateTime<Utc>>,
    /// Block deadline; reported while a block is active.
    pub blocked_until: Option<DateTime<Utc>>,
}

impl LimitCheck {
    /// Check result for a key with no usable attempt history.
    #[must_use]
    pub fn fresh(max_attempts: u32) -> Self {
        Self {
            allowed: true,
            remaining: max_attempts.saturating_sub(1),
            reset_at: None,
            blocked_until: None,
        }
    }

    /// Check result when the window still has budget for this attempt.
    #[must_use]
    pub fn allowed(remaining: u32) -> Self {
        Self {
            allowed: true,
            remaining,
            reset_at: None,
            blocked_until: None,
        }
    }

    /// Check result while a block is in force.
    #[must_use]
    pub fn blocked(blocked_until: DateTime<Utc>) -> Self {
        Self {
            allowed: false,
            remaining: 0,
            reset_at: None,
            blocked_until: Some(blocked_until),
        }
    }

    /// Check result when the window budget is used up but no block is set.
    #[must_use]
    pub fn window_exhausted(reset_at: DateTime<Utc>) -> Self {
        Self {
            allowed: false,
            remaining: 0,
            reset_at: Some(reset_at),
            blocked_until: None,
        }
    }
}

/// Divides two `i64` values rounding toward positive infinity.
///
/// Equivalent to the still-unstable `i64::div_ceil`.
fn div_ceil_i64(lhs: i64, rhs: i64) -> i64 {
    let d = lhs / rhs;
    let r = lhs % rhs;
    if (r > 0 && rhs > 0) || (r < 0 && rhs < 0) {
        d + 1
    } else {
        d
    }
}

/// Formats a countdown duration for user-facing messages.
///
/// Rounds up to whole minutes below one hour, otherwise to whole hours.
#[must_use]
pub fn format_time_remaining(remaining: TimeDelta) -> String {
    let minutes = div_ceil_i64(remaining.num_milliseconds(), 60_000);
    if minutes < 60 {
        let unit = if minutes == 1 { "minute" } else { "minutes" };
        format!("{minutes} {unit}")
    } else {
        let hours = div_ceil_i64(minutes, 60);
        let unit = if hours == 1 { "hour" } else { "hours" };
        format!("{hours} {unit}")
    }
}
