//! Admin handlers for the `/admin/films` resource.
//!
//! Every mutation publishes a revalidation signal for the films index, the
//! homepage, the film's detail page (old and new slug) and the detail page
//! of any venue the film was or is attached to. Related rows are read before
//! the write commits, so a committed write always announces itself.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use vowreel_core::content::ContentKind;
use vowreel_core::error::CoreError;
use vowreel_core::types::DbId;
use vowreel_db::models::film::{Film, FilmInput};
use vowreel_db::models::venue::VenueSummary;
use vowreel_db::repositories::{FilmRepo, VenueFilmRepo};
use vowreel_events::{MutationAction, RevalidationEvent};

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::{Deleted, SuccessResponse};
use crate::state::AppState;

const ENTITY: &str = "Film";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

fn venue_paths<'a>(venues: impl IntoIterator<Item = &'a VenueSummary>) -> Vec<String> {
    venues
        .into_iter()
        .map(|venue| ContentKind::Venue.detail_path(&venue.slug))
        .collect()
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/films
///
/// List every film, drafts included, in listing order.
pub async fn list(_user: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let films = FilmRepo::list(&state.pool).await?;
    Ok(Json(SuccessResponse::new(films)))
}

/// POST /api/v1/admin/films
///
/// Create a film with its vendors, gallery and optional venue.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<FilmInput>,
) -> AppResult<impl IntoResponse> {
    let detail = FilmRepo::create(&state.pool, &input).await?;
    let film = &detail.film;

    tracing::info!(film_id = film.id, slug = %film.slug, user = %user.subject, "Film created");
    state.revalidation.publish(
        RevalidationEvent::new(
            ContentKind::Film,
            MutationAction::Created,
            film.id,
            [film.slug.as_str()],
        )
        .with_paths(venue_paths(detail.venue.as_ref())),
    );

    Ok((StatusCode::CREATED, Json(SuccessResponse::new(detail))))
}

/// GET /api/v1/admin/films/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = FilmRepo::find_detail_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(SuccessResponse::new(detail)))
}

/// GET /api/v1/admin/films/by-slug/{slug}
///
/// Preview lookup; unpublished films are returned too.
pub async fn get_by_slug(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let detail = FilmRepo::find_detail_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::Core(CoreError::NotFoundBySlug { entity: ENTITY, slug }))?;
    Ok(Json(SuccessResponse::new(detail)))
}

/// PUT /api/v1/admin/films/{id}
///
/// Replace every field, the vendors, the gallery and the venue association.
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<FilmInput>,
) -> AppResult<impl IntoResponse> {
    let previous_venue = VenueFilmRepo::find_venue_for_film(&state.pool, id).await?;

    let updated = FilmRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    let detail = updated.row;

    tracing::info!(
        film_id = id,
        slug = %detail.film.slug,
        previous_slug = %updated.previous_slug,
        user = %user.subject,
        "Film updated"
    );
    state.revalidation.publish(
        RevalidationEvent::new(
            ContentKind::Film,
            MutationAction::Updated,
            id,
            [updated.previous_slug.as_str(), detail.film.slug.as_str()],
        )
        .with_paths(venue_paths(previous_venue.iter().chain(detail.venue.as_ref()))),
    );

    Ok(Json(SuccessResponse::new(detail)))
}

/// DELETE /api/v1/admin/films/{id}
///
/// Delete a film with its vendors, gallery and venue association.
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let venue = VenueFilmRepo::find_venue_for_film(&state.pool, id).await?;

    let film = FilmRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(film_id = id, slug = %film.slug, user = %user.subject, "Film deleted");
    state.revalidation.publish(
        RevalidationEvent::new(
            ContentKind::Film,
            MutationAction::Deleted,
            id,
            [film.slug.as_str()],
        )
        .with_paths(venue_paths(venue.as_ref())),
    );

    Ok(Json(SuccessResponse::new(Deleted { id, slug: film.slug })))
}

/// POST /api/v1/admin/films/{id}/publish
///
/// Flip the `published` flag.
pub async fn toggle_published(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let venue = VenueFilmRepo::find_venue_for_film(&state.pool, id).await?;
    let film = FilmRepo::toggle_published(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(film_id = id, published = film.published, user = %user.subject, "Film publish toggled");

    announce_toggle(&state, &film, venue.as_ref(), MutationAction::PublishToggled);
    Ok(Json(SuccessResponse::new(film)))
}

/// POST /api/v1/admin/films/{id}/feature
///
/// Flip the `featured` flag.
pub async fn toggle_featured(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let venue = VenueFilmRepo::find_venue_for_film(&state.pool, id).await?;
    let film = FilmRepo::toggle_featured(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(film_id = id, featured = film.featured, user = %user.subject, "Film feature toggled");

    announce_toggle(&state, &film, venue.as_ref(), MutationAction::FeatureToggled);
    Ok(Json(SuccessResponse::new(film)))
}

fn announce_toggle(
    state: &AppState,
    film: &Film,
    venue: Option<&VenueSummary>,
    action: MutationAction,
) {
    state.revalidation.publish(
        RevalidationEvent::new(ContentKind::Film, action, film.id, [film.slug.as_str()])
            .with_paths(venue_paths(venue)),
    );
}
