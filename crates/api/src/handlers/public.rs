//! Unauthenticated read handlers for the public site.
//!
//! Only published rows are visible. Related content that is still a draft
//! (a film's venue, a venue's films) is stripped from detail responses.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use vowreel_core::content::ContentKind;
use vowreel_core::error::CoreError;
use vowreel_db::repositories::{BlogPostRepo, FilmRepo, VenueRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BlogListParams {
    pub category: Option<String>,
}

fn not_published(kind: ContentKind, slug: String) -> AppError {
    AppError::Core(CoreError::NotFoundBySlug {
        entity: kind.entity(),
        slug,
    })
}

/// GET /api/v1/public/films
pub async fn list_films(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let films = FilmRepo::list_published(&state.pool).await?;
    Ok(Json(DataResponse { data: films }))
}

/// GET /api/v1/public/films/highlights
///
/// Homepage reel: featured first, then by rating.
pub async fn film_highlights(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let limit = i64::from(state.config.homepage_highlight_limit);
    let films = FilmRepo::list_highlights(&state.pool, limit).await?;
    Ok(Json(DataResponse { data: films }))
}

/// GET /api/v1/public/films/{slug}
pub async fn get_film(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let mut detail = match FilmRepo::find_detail_by_slug(&state.pool, &slug).await? {
        Some(detail) if detail.film.published => detail,
        _ => return Err(not_published(ContentKind::Film, slug)),
    };
    if detail.venue.as_ref().is_some_and(|venue| !venue.published) {
        detail.venue = None;
    }
    Ok(Json(DataResponse { data: detail }))
}

/// GET /api/v1/public/venues
pub async fn list_venues(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let venues = VenueRepo::list_published(&state.pool).await?;
    Ok(Json(DataResponse { data: venues }))
}

/// GET /api/v1/public/venues/{slug}
pub async fn get_venue(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let mut detail = match VenueRepo::find_detail_by_slug(&state.pool, &slug).await? {
        Some(detail) if detail.venue.published => detail,
        _ => return Err(not_published(ContentKind::Venue, slug)),
    };
    detail.films.retain(|film| film.published);
    Ok(Json(DataResponse { data: detail }))
}

/// GET /api/v1/public/blog?category=
pub async fn list_blog_posts(
    State(state): State<AppState>,
    Query(params): Query<BlogListParams>,
) -> AppResult<impl IntoResponse> {
    let category = params
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    let posts = BlogPostRepo::list_published(&state.pool, category).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// GET /api/v1/public/blog/{slug}
pub async fn get_blog_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    match BlogPostRepo::find_by_slug(&state.pool, &slug).await? {
        Some(post) if post.published => Ok(Json(DataResponse { data: post })),
        _ => Err(not_published(ContentKind::BlogPost, slug)),
    }
}
