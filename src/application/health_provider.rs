// Provider trait for health snapshots
use crate::domain::snapshot::Snapshot;
use async_trait::async_trait;
use thiserror::Error;

/// Why a refresh produced no snapshot. Any of these degrades the whole
/// dashboard for the cycle.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode body from {url}: {message}")]
    Decode { url: String, message: String },
}

#[async_trait]
pub trait HealthProvider: Send + Sync {
    /// Fetch the current snapshot, bypassing any HTTP cache.
    async fn fetch(&self) -> Result<Snapshot, FetchError>;
}
