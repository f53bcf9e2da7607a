use axum::routing::get;
use axum::Router;

use crate::handlers::public;
use crate::state::AppState;

/// Unauthenticated read routes mounted at `/public`.
///
/// ```text
/// GET /films              -> list_films
/// GET /films/highlights   -> film_highlights
/// GET /films/{slug}       -> get_film
/// GET /venues             -> list_venues
/// GET /venues/{slug}      -> get_venue
/// GET /blog               -> list_blog_posts (?category=)
/// GET /blog/{slug}        -> get_blog_post
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/films", get(public::list_films))
        .route("/films/highlights", get(public::film_highlights))
        .route("/films/{slug}", get(public::get_film))
        .route("/venues", get(public::list_venues))
        .route("/venues/{slug}", get(public::get_venue))
        .route("/blog", get(public::list_blog_posts))
        .route("/blog/{slug}", get(public::get_blog_post))
}
