use axum::routing::{get, post};
use axum::Router;

use crate::handlers::blog_posts;
use crate::state::AppState;

/// Admin blog post routes mounted at `/admin/blog-posts`.
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
        .route("/", get(blog_posts::list).post(blog_posts::create))
        .route("/by-slug/{slug}", get(blog_posts::get_by_slug))
        .route(
            "/{id}",
            get(blog_posts::get_by_id)
                .put(blog_posts::update)
                .delete(blog_posts::delete),
        )
        .route("/{id}/publish", post(blog_posts::toggle_published))
        .route("/{id}/feature", post(blog_posts::toggle_featured))
}
