use async_trait::async_trait;
use chrono::{DateTime, Utc};

use limitra_core::AppResult;
use limitra_domain::RateLimitRegistry;

/// Port for the durable slot the registry is mirrored into.
///
/// An implementation owns a single fixed slot (a file path, a memory cell)
/// and the limiter is its only reader and writer. The whole registry is
/// loaded and saved as one snapshot.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Loads the persisted registry, or `None` when the slot is empty.
    async fn load(&self) -> AppResult<Option<RateLimitRegistry>>;

    /// Replaces the slot contents with the given registry.
    async fn save(&self, registry: &RateLimitRegistry) -> AppResult<()>;
}

/// Port for reading the current time, injectable so tests can drive it.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}
