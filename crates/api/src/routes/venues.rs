use axum::routing::{get, post};
use axum::Router;

use crate::handlers::venues;
use crate::state::AppState;

/// Admin venue routes mounted at `/admin/venues`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create
/// GET    /by-slug/{slug}  -> get_by_slug
/// GET    /{id}            -> get_by_id
/// PUT    /{id}            -> update
/// DELETE /{id}            -> delete
/// POST   /{id}/publish    -> toggle_published
/// POST   /{id}/feature    -> toggle_featured
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(venues::list).post(venues::create))
        .route("/by-slug/{slug}", get(venues::get_by_slug))
        .route(
            "/{id}",
            get(venues::get_by_id)
                .put(venues::update)
                .delete(venues::delete),
        )
        .route("/{id}/publish", post(venues::toggle_published))
        .route("/{id}/feature", post(venues::toggle_featured))
}
