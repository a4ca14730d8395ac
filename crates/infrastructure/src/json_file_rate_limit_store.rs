//! JSON-file-backed rate limit store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use limitra_application::RateLimitStore;
use limitra_core::{AppError, AppResult};
use limitra_domain::RateLimitRegistry;

/// File name used when the store is rooted at a state directory.
pub const RATE_LIMIT_FILE_NAME: &str = "rate-limits.json";

/// JSON file implementation of the rate limit store port.
///
/// The whole registry is written as one JSON object keyed by tracking key.
/// Writes go to a temporary sibling first and are then moved into place, so
/// a crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct JsonFileRateLimitStore {
    path: PathBuf,
}

impl JsonFileRateLimitStore {
    /// Creates a store persisting to the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store persisting to [`RATE_LIMIT_FILE_NAME`] inside
    /// `state_dir`.
    #[must_use]
    pub fn in_dir(state_dir: impl AsRef<Path>) -> Self {
        Self::new(state_dir.as_ref().join(RATE_LIMIT_FILE_NAME))
    }

    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| RATE_LIMIT_FILE_NAME.to_owned());
        self.path
            .with_file_name(format!("{file_name}.tmp.{}", std::process::id()))
    }
}

#[async_trait]
impl RateLimitStore for JsonFileRateLimitStore {
    async fn load(&self) -> AppResult<Option<RateLimitRegistry>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(AppError::Storage(format!(
                    "failed to read rate limit snapshot '{}': {error}",
                    self.path.display()
                )));
            }
        };

        let registry = serde_json::from_str(&contents).map_err(|error| {
            AppError::Validation(format!(
                "invalid rate limit snapshot '{}': {error}",
                self.path.display()
            ))
        })?;

        Ok(Some(registry))
    }

    async fn save(&self, registry: &RateLimitRegistry) -> AppResult<()> {
        let contents = serde_json::to_string(registry).map_err(|error| {
            AppError::Validation(format!(
                "failed to serialize rate limit snapshot: {error}"
            ))
        })?;

        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, contents)
            .await
            .map_err(|error| {
                AppError::Storage(format!(
                    "failed to write rate limit snapshot '{}': {error}",
                    temp_path.display()
                ))
            })?;

        if let Err(error) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(AppError::Storage(format!(
                "failed to move rate limit snapshot into '{}': {error}",
                self.path.display()
            )));
        }

        Ok(())
    }
}
