use chrono::TimeDelta;

/// Limits applied to one checked action.
///
/// Call sites start from [`RateLimitConfig::default`] and override fields
/// with struct update syntax where a flow needs different limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Attempt count at which blocking engages.
    pub max_attempts: u32,
    /// Sliding window inside which attempts accumulate.
    pub window: TimeDelta,
    /// Cooldown applied once the threshold is crossed.
    pub block_duration: TimeDelta,
}

impl RateLimitConfig {
    /// Creates a config with explicit limits.
    #[must_use]
    pub fn new(max_attempts: u32, window: TimeDelta, block_duration: TimeDelta) -> Self {
        Self {
            max_attempts,
            window,
            block_duration,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window: TimeDelta::minutes(15),
            block_duration: TimeDelta::minutes(30),
        }
    }
}

/// Builds the tracking key for an action scoped to one identity.
///
/// Keys follow the `"{action}:{identity}"` convention, e.g.
/// `code-verify:user@example.com`, so limits apply per identity rather than
/// per device alone.
#[must_use]
pub fn scoped_key(action: &str, identity: &str) -> String {
    format!("{action}:{identity}")
}
