pub mod blog_posts;
pub mod films;
pub mod health;
pub mod public;
pub mod uploads;
pub mod venues;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /public/films                                    published films
/// /public/films/highlights                         homepage highlights
/// /public/films/{slug}                             published film detail
/// /public/venues                                   published venues
/// /public/venues/{slug}                            published venue detail
/// /public/blog                                     published posts (?category=)
/// /public/blog/{slug}                              published post
///
/// /admin/films                                     list, create (auth)
/// /admin/films/{id}                                get, update, delete
/// /admin/films/by-slug/{slug}                      preview
/// /admin/films/{id}/publish                        toggle published (POST)
/// /admin/films/{id}/feature                        toggle featured (POST)
///
/// /admin/venues/...                                same shape as films
/// /admin/blog-posts/...                            same shape as films
///
/// /admin/uploads                                   upload (POST), delete (?key=)
/// /admin/uploads/batch                             multi-file upload (POST)
/// /admin/uploads/arrange                           asset list move/remove (POST)
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        // Public site reads.
        .nest("/public", public::router())
        // Content administration.
        .nest("/admin/films", films::router())
        .nest("/admin/venues", venues::router())
        .nest("/admin/blog-posts", blog_posts::router())
        // Image uploads.
        .nest(
            "/admin/uploads",
            uploads::router(config.upload_body_limit_bytes),
        )
}
