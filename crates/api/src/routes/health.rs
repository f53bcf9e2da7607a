use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Object store backing uploads (`s3` or `memory`).
    pub storage: &'static str,
}

/// GET /health
///
/// Always answers 200 so load balancers can tell a degraded instance from a
/// dead one.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match vowreel_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            false
        }
    };

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        storage: state.config.storage.label(),
    })
}

/// Mount health routes at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
