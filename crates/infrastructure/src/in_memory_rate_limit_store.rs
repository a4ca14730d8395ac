use async_trait::async_trait;
use tokio::sync::RwLock;

use limitra_application::RateLimitStore;
use limitra_core::AppResult;
use limitra_domain::RateLimitRegistry;

/// In-memory implementation of the rate limit store port.
///
/// Backs the limiter in tests and in hosts without durable storage; the
/// snapshot lives only as long as the process.
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    snapshot: RwLock<Option<RateLimitRegistry>>,
}

impl InMemoryRateLimitStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(None),
        }
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn load(&self) -> AppResult<Option<RateLimitRegistry>> {
        Ok(self.snapshot.read().await.clone())
    }

    async fn save(&self, registry: &RateLimitRegistry) -> AppResult<()> {
        *self.snapshot.write().await = Some(registry.clone());
        Ok(())
    }
}
