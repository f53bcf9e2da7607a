use std::sync::Arc;

use vowreel_events::RevalidationBus;
use vowreel_storage::AssetUploader;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: vowreel_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Image upload pipeline over the configured object store.
    pub uploader: Arc<AssetUploader>,
    /// Cache revalidation signals for the public site.
    pub revalidation: Arc<RevalidationBus>,
}
