//! Admin handlers for the `/admin/venues` resource.
//!
//! Mutations revalidate the venues index, the venue's detail page (old and
//! new slug), the detail page of every film linked before or after, and the
//! detail page of any other venue that lost a film to this one.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use vowreel_core::content::ContentKind;
use vowreel_core::error::CoreError;
use vowreel_core::types::DbId;
use vowreel_db::models::film::FilmSummary;
use vowreel_db::models::venue::{Venue, VenueInput, VenueSummary};
use vowreel_db::repositories::{VenueFilmRepo, VenueRepo};
use vowreel_events::{MutationAction, RevalidationEvent};

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::{Deleted, SuccessResponse};
use crate::state::AppState;

const ENTITY: &str = "Venue";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

fn film_paths<'a>(films: impl IntoIterator<Item = &'a FilmSummary>) -> Vec<String> {
    films
        .into_iter()
        .map(|film| ContentKind::Film.detail_path(&film.slug))
        .collect()
}

fn venue_paths(venues: &[VenueSummary]) -> Vec<String> {
    venues
        .iter()
        .map(|venue| ContentKind::Venue.detail_path(&venue.slug))
        .collect()
}

/// GET /api/v1/admin/venues
pub async fn list(_user: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let venues = VenueRepo::list(&state.pool).await?;
    Ok(Json(SuccessResponse::new(venues)))
}

/// POST /api/v1/admin/venues
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<VenueInput>,
) -> AppResult<impl IntoResponse> {
    let saved = VenueRepo::create(&state.pool, &input).await?;
    let detail = saved.detail;
    let venue = &detail.venue;

    tracing::info!(venue_id = venue.id, slug = %venue.slug, user = %user.subject, "Venue created");
    state.revalidation.publish(
        RevalidationEvent::new(
            ContentKind::Venue,
            MutationAction::Created,
            venue.id,
            [venue.slug.as_str()],
        )
        .with_paths(film_paths(&detail.films))
        .with_paths(venue_paths(&saved.detached_from)),
    );

    Ok((StatusCode::CREATED, Json(SuccessResponse::new(detail))))
}

/// GET /api/v1/admin/venues/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let detail = VenueRepo::find_detail_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(SuccessResponse::new(detail)))
}

/// GET /api/v1/admin/venues/by-slug/{slug}
pub async fn get_by_slug(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let detail = VenueRepo::find_detail_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::Core(CoreError::NotFoundBySlug { entity: ENTITY, slug }))?;
    Ok(Json(SuccessResponse::new(detail)))
}

/// PUT /api/v1/admin/venues/{id}
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<VenueInput>,
) -> AppResult<impl IntoResponse> {
    let previous_films = VenueFilmRepo::list_films_for_venue(&state.pool, id).await?;

    let updated = VenueRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    let detail = updated.row.detail;

    tracing::info!(
        venue_id = id,
        slug = %detail.venue.slug,
        previous_slug = %updated.previous_slug,
        films = detail.films.len(),
        user = %user.subject,
        "Venue updated"
    );
    state.revalidation.publish(
        RevalidationEvent::new(
            ContentKind::Venue,
            MutationAction::Updated,
            id,
            [updated.previous_slug.as_str(), detail.venue.slug.as_str()],
        )
        .with_paths(film_paths(previous_films.iter().chain(&detail.films)))
        .with_paths(venue_paths(&updated.row.detached_from)),
    );

    Ok(Json(SuccessResponse::new(detail)))
}

/// DELETE /api/v1/admin/venues/{id}
///
/// Linked films survive; only their association to this venue is removed.
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let films = VenueFilmRepo::list_films_for_venue(&state.pool, id).await?;

    let venue = VenueRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(venue_id = id, slug = %venue.slug, user = %user.subject, "Venue deleted");
    state.revalidation.publish(
        RevalidationEvent::new(
            ContentKind::Venue,
            MutationAction::Deleted,
            id,
            [venue.slug.as_str()],
        )
        .with_paths(film_paths(&films)),
    );

    Ok(Json(SuccessResponse::new(Deleted { id, slug: venue.slug })))
}

/// POST /api/v1/admin/venues/{id}/publish
pub async fn toggle_published(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let films = VenueFilmRepo::list_films_for_venue(&state.pool, id).await?;
    let venue = VenueRepo::toggle_published(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(venue_id = id, published = venue.published, user = %user.subject, "Venue publish toggled");

    announce_toggle(&state, &venue, &films, MutationAction::PublishToggled);
    Ok(Json(SuccessResponse::new(venue)))
}

/// POST /api/v1/admin/venues/{id}/feature
pub async fn toggle_featured(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let films = VenueFilmRepo::list_films_for_venue(&state.pool, id).await?;
    let venue = VenueRepo::toggle_featured(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(venue_id = id, featured = venue.featured, user = %user.subject, "Venue feature toggled");

    announce_toggle(&state, &venue, &films, MutationAction::FeatureToggled);
    Ok(Json(SuccessResponse::new(venue)))
}

fn announce_toggle(state: &AppState, venue: &Venue, films: &[FilmSummary], action: MutationAction) {
    state.revalidation.publish(
        RevalidationEvent::new(ContentKind::Venue, action, venue.id, [venue.slug.as_str()])
            .with_paths(film_paths(films)),
    );
}
