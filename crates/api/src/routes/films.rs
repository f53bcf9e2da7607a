use axum::routing::{get, post};
use axum::Router;

use crate::handlers::films;
use crate::state::AppState;

/// Admin film routes mounted at `/admin/films`.
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
        .route("/", get(films::list).post(films::create))
        .route("/by-slug/{slug}", get(films::get_by_slug))
        .route(
            "/{id}",
            get(films::get_by_id)
                .put(films::update)
                .delete(films::delete),
        )
        .route("/{id}/publish", post(films::toggle_published))
        .route("/{id}/feature", post(films::toggle_featured))
}
