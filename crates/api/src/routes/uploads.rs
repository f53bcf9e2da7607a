use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

/// Image upload routes mounted at `/admin/uploads`.
///
/// The transport limit is raised to `body_limit` so oversize images reach
/// the uploader and get a structured `FILE_TOO_LARGE` answer.
///
/// ```text
/// POST   /          -> upload (multipart)
/// DELETE /?key=     -> delete
/// POST   /batch     -> upload_batch (multipart)
/// POST   /arrange   -> arrange
/// ```
pub fn router(body_limit: usize) -> Router<AppState> {
    Router::new()
        .route("/", post(uploads::upload).delete(uploads::delete))
        .route("/batch", post(uploads::upload_batch))
        .route("/arrange", post(uploads::arrange))
        .layer(DefaultBodyLimit::max(body_limit))
}
