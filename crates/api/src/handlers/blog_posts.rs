//! Admin handlers for the `/admin/blog-posts` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use vowreel_core::content::ContentKind;
use vowreel_core::error::CoreError;
use vowreel_core::types::DbId;
use vowreel_db::models::blog_post::BlogPostInput;
use vowreel_db::repositories::BlogPostRepo;
use vowreel_events::{MutationAction, RevalidationEvent};

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::{Deleted, SuccessResponse};
use crate::state::AppState;

const ENTITY: &str = "BlogPost";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// GET /api/v1/admin/blog-posts
pub async fn list(_user: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let posts = BlogPostRepo::list(&state.pool).await?;
    Ok(Json(SuccessResponse::new(posts)))
}

/// POST /api/v1/admin/blog-posts
///
/// `post_date` defaults to today when omitted.
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<BlogPostInput>,
) -> AppResult<impl IntoResponse> {
    let post = BlogPostRepo::create(&state.pool, &input).await?;

    tracing::info!(post_id = post.id, slug = %post.slug, user = %user.subject, "Blog post created");
    state.revalidation.publish(RevalidationEvent::new(
        ContentKind::BlogPost,
        MutationAction::Created,
        post.id,
        [post.slug.as_str()],
    ));

    Ok((StatusCode::CREATED, Json(SuccessResponse::new(post))))
}

/// GET /api/v1/admin/blog-posts/{id}
pub async fn get_by_id(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let post = BlogPostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(SuccessResponse::new(post)))
}

/// GET /api/v1/admin/blog-posts/by-slug/{slug}
pub async fn get_by_slug(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let post = BlogPostRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or(AppError::Core(CoreError::NotFoundBySlug { entity: ENTITY, slug }))?;
    Ok(Json(SuccessResponse::new(post)))
}

/// PUT /api/v1/admin/blog-posts/{id}
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<BlogPostInput>,
) -> AppResult<impl IntoResponse> {
    let updated = BlogPostRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        post_id = id,
        slug = %updated.row.slug,
        previous_slug = %updated.previous_slug,
        user = %user.subject,
        "Blog post updated"
    );
    state.revalidation.publish(RevalidationEvent::new(
        ContentKind::BlogPost,
        MutationAction::Updated,
        id,
        [updated.previous_slug.as_str(), updated.row.slug.as_str()],
    ));

    Ok(Json(SuccessResponse::new(updated.row)))
}

/// DELETE /api/v1/admin/blog-posts/{id}
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let post = BlogPostRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(post_id = id, slug = %post.slug, user = %user.subject, "Blog post deleted");
    state.revalidation.publish(RevalidationEvent::new(
        ContentKind::BlogPost,
        MutationAction::Deleted,
        id,
        [post.slug.as_str()],
    ));

    Ok(Json(SuccessResponse::new(Deleted { id, slug: post.slug })))
}

/// POST /api/v1/admin/blog-posts/{id}/publish
pub async fn toggle_published(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let post = BlogPostRepo::toggle_published(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(post_id = id, published = post.published, user = %user.subject, "Blog post publish toggled");
    state.revalidation.publish(RevalidationEvent::new(
        ContentKind::BlogPost,
        MutationAction::PublishToggled,
        id,
        [post.slug.as_str()],
    ));

    Ok(Json(SuccessResponse::new(post)))
}

/// POST /api/v1/admin/blog-posts/{id}/feature
pub async fn toggle_featured(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let post = BlogPostRepo::toggle_featured(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(post_id = id, featured = post.featured, user = %user.subject, "Blog post feature toggled");
    state.revalidation.publish(RevalidationEvent::new(
        ContentKind::BlogPost,
        MutationAction::FeatureToggled,
        id,
        [post.slug.as_str()],
    ));

    Ok(Json(SuccessResponse::new(post)))
}
