//! The object store seam.

use async_trait::async_trait;

/// Error type for object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No object exists under the key.
    #[error("Object not found: {0}")]
    NotFound(String),

    /// The backend could not be reached or rejected the request.
    #[error("Object store unavailable: {0}")]
    Unavailable(String),
}

/// Minimal write-side interface of an object store.
///
/// Implementations must be shareable across requests (`Arc<dyn ObjectStore>`).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` under `key`, replacing any existing object.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StoreError>;

    /// Remove the object under `key`.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
