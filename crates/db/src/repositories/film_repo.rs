//! Repository for the `films` table and its child collections.

use sqlx::{PgConnection, PgPool};
use vowreel_core::types::DbId;

use super::{lock_slug, slug_taken, GalleryOwner, GalleryRepo, VendorRepo, VenueFilmRepo};
use crate::error::RepoError;
use crate::models::film::{Film, FilmDetail, FilmInput};
use crate::models::Updated;

/// Column list for the `films` table.
const COLUMNS: &str = "id, slug, title, subtitle, tagline, location, header_image, \
    video_url, trailer_url, story_content, published, featured, sort_order, rating, \
    created_at, updated_at";

/// Films listing order: featured first, then manual order.
const LISTING_ORDER: &str = "featured DESC, sort_order ASC, id ASC";

/// Homepage highlights order: featured first, then best rated.
const HIGHLIGHTS_ORDER: &str = "featured DESC, rating DESC, id ASC";

const ENTITY: &str = "Film";

/// Provides CRUD operations for films, their vendors, gallery and venue link.
pub struct FilmRepo;

impl FilmRepo {
    /// Insert a film with its vendors, gallery and optional venue association.
    ///
    /// Fails with [`RepoError::DuplicateSlug`] if the slug is in use. The
    /// returned detail is read inside the same transaction.
    pub async fn create(pool: &PgPool, input: &FilmInput) -> Result<FilmDetail, RepoError> {
        let mut tx = pool.begin().await?;

        if slug_taken(&mut tx, "films", &input.slug, None).await? {
            return Err(RepoError::DuplicateSlug {
                entity: ENTITY,
                slug: input.slug.clone(),
            });
        }

        let insert_query = format!(
            "INSERT INTO films \
                (slug, title, subtitle, tagline, location, header_image, video_url, \
                 trailer_url, story_content, published, featured, sort_order, rating) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING {COLUMNS}"
        );
        let film = sqlx::query_as::<_, Film>(&insert_query)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(&input.tagline)
            .bind(&input.location)
            .bind(&input.header_image)
            .bind(&input.video_url)
            .bind(&input.trailer_url)
            .bind(&input.story_content)
            .bind(input.published)
            .bind(input.featured)
            .bind(input.sort_order)
            .bind(input.rating)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| RepoError::from_slug_write(e, ENTITY, &input.slug))?;

        Self::write_children_inner(&mut tx, film.id, input).await?;
        let detail = Self::attach_children_inner(&mut tx, film).await?;

        tx.commit().await?;
        Ok(detail)
    }

    /// Find a film by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Film>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM films WHERE id = $1");
        sqlx::query_as::<_, Film>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a film by slug, whatever its published state.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Film>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM films WHERE slug = $1");
        sqlx::query_as::<_, Film>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Find a film by ID with vendors, gallery and venue attached.
    pub async fn find_detail_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<FilmDetail>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(film) => Self::attach_children(pool, film).await.map(Some),
            None => Ok(None),
        }
    }

    /// Find a film by slug with vendors, gallery and venue attached.
    pub async fn find_detail_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<FilmDetail>, sqlx::Error> {
        match Self::find_by_slug(pool, slug).await? {
            Some(film) => Self::attach_children(pool, film).await.map(Some),
            None => Ok(None),
        }
    }

    /// List every film, published or not, in listing order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Film>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM films ORDER BY {LISTING_ORDER}");
        sqlx::query_as::<_, Film>(&query).fetch_all(pool).await
    }

    /// List published films in listing order.
    pub async fn list_published(pool: &PgPool) -> Result<Vec<Film>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM films \
             WHERE published = true \
             ORDER BY {LISTING_ORDER}"
        );
        sqlx::query_as::<_, Film>(&query).fetch_all(pool).await
    }

    /// Published films for the homepage, featured first then by rating.
    pub async fn list_highlights(pool: &PgPool, limit: i64) -> Result<Vec<Film>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM films \
             WHERE published = true \
             ORDER BY {HIGHLIGHTS_ORDER} \
             LIMIT $1"
        );
        sqlx::query_as::<_, Film>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Replace every field and child collection of a film.
    ///
    /// Returns `None` if no row with the given `id` exists. Keeping the
    /// film's own slug is not a collision.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &FilmInput,
    ) -> Result<Option<Updated<FilmDetail>>, RepoError> {
        let mut tx = pool.begin().await?;

        let Some(previous_slug) = lock_slug(&mut tx, "films", id).await? else {
            return Ok(None);
        };

        if slug_taken(&mut tx, "films", &input.slug, Some(id)).await? {
            return Err(RepoError::DuplicateSlug {
                entity: ENTITY,
                slug: input.slug.clone(),
            });
        }

        let update_query = format!(
            "UPDATE films SET \
                slug = $2, title = $3, subtitle = $4, tagline = $5, location = $6, \
                header_image = $7, video_url = $8, trailer_url = $9, story_content = $10, \
                published = $11, featured = $12, sort_order = $13, rating = $14, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let film = sqlx::query_as::<_, Film>(&update_query)
            .bind(id)
            .bind(&input.slug)
            .bind(&input.title)
            .bind(&input.subtitle)
            .bind(&input.tagline)
            .bind(&input.location)
            .bind(&input.header_image)
            .bind(&input.video_url)
            .bind(&input.trailer_url)
            .bind(&input.story_content)
            .bind(input.published)
            .bind(input.featured)
            .bind(input.sort_order)
            .bind(input.rating)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| RepoError::from_slug_write(e, ENTITY, &input.slug))?;

        Self::write_children_inner(&mut tx, film.id, input).await?;
        let detail = Self::attach_children_inner(&mut tx, film).await?;

        tx.commit().await?;
        Ok(Some(Updated {
            row: detail,
            previous_slug,
        }))
    }

    /// Delete a film with its vendors, gallery and venue association.
    ///
    /// Returns the deleted row, or `None` if it did not exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Film>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        VendorRepo::delete_inner(&mut tx, id).await?;
        GalleryRepo::delete_inner(&mut tx, GalleryOwner::Film(id)).await?;
        VenueFilmRepo::delete_for_film_inner(&mut tx, id).await?;

        let query = format!("DELETE FROM films WHERE id = $1 RETURNING {COLUMNS}");
        let film = sqlx::query_as::<_, Film>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(film)
    }

    /// Flip `published` and bump `updated_at`.
    pub async fn toggle_published(pool: &PgPool, id: DbId) -> Result<Option<Film>, sqlx::Error> {
        let query = format!(
            "UPDATE films SET published = NOT published, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Film>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Flip `featured` and bump `updated_at`.
    pub async fn toggle_featured(pool: &PgPool, id: DbId) -> Result<Option<Film>, sqlx::Error> {
        let query = format!(
            "UPDATE films SET featured = NOT featured, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Film>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn attach_children(pool: &PgPool, film: Film) -> Result<FilmDetail, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::attach_children_inner(&mut conn, film).await
    }

    async fn attach_children_inner(
        conn: &mut PgConnection,
        film: Film,
    ) -> Result<FilmDetail, sqlx::Error> {
        let vendors = VendorRepo::list_for_film_inner(conn, film.id).await?;
        let gallery = GalleryRepo::list_inner(conn, GalleryOwner::Film(film.id)).await?;
        let venue = VenueFilmRepo::find_venue_for_film_inner(conn, film.id).await?;
        Ok(FilmDetail {
            film,
            vendors,
            gallery,
            venue,
        })
    }

    /// Replace vendors, gallery and venue association within a transaction.
    async fn write_children_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        film_id: DbId,
        input: &FilmInput,
    ) -> Result<(), sqlx::Error> {
        VendorRepo::replace_inner(tx, film_id, &input.vendors).await?;
        GalleryRepo::replace_inner(tx, GalleryOwner::Film(film_id), &input.gallery).await?;
        VenueFilmRepo::set_venue_for_film_inner(tx, film_id, input.venue_id).await?;
        Ok(())
    }
}
