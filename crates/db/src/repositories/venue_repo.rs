//! Repository for the `venues` table and its child collections.

use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};
use vowreel_core::types::DbId;

use super::{lock_slug, slug_taken, GalleryOwner, GalleryRepo, VenueFilmRepo};
use crate::error::RepoError;
use crate::models::venue::{SavedVenue, Venue, VenueDetail, VenueInput};
use crate::models::Updated;

/// Column list for the `venues` table.
const COLUMNS: &str = "id, slug, venue_title, short_description, expanded_text, address, \
    phone, website, city, header_image, guest_capacity, catering, ceremony_options, \
    amenities, price_from, price_notes, published, featured, created_at, updated_at";

/// Venues listing order: featured first, then alphabetical.
const LISTING_ORDER: &str = "featured DESC, venue_title ASC, id ASC";

const ENTITY: &str = "Venue";

/// Provides CRUD operations for venues, their gallery and attached films.
pub struct VenueRepo;

impl VenueRepo {
    /// Insert a venue with its gallery and film associations.
    ///
    /// Listed films attached elsewhere move here; their former venues are
    /// reported in [`SavedVenue::detached_from`].
    pub async fn create(pool: &PgPool, input: &VenueInput) -> Result<SavedVenue, RepoError> {
        let mut tx = pool.begin().await?;

        if slug_taken(&mut tx, "venues", &input.slug, None).await? {
            return Err(RepoError::DuplicateSlug {
                entity: ENTITY,
                slug: input.slug.clone(),
            });
        }

        let insert_query = format!(
            "INSERT INTO venues \
                (slug, venue_title, short_description, expanded_text, address, phone, \
                 website, city, header_image, guest_capacity, catering, ceremony_options, \
                 amenities, price_from, price_notes, published, featured) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17) \
             RETURNING {COLUMNS}"
        );
        let venue = sqlx::query_as::<_, Venue>(&insert_query)
            .bind(&input.slug)
            .bind(&input.venue_title)
            .bind(&input.short_description)
            .bind(&input.expanded_text)
            .bind(&input.address)
            .bind(&input.phone)
            .bind(&input.website)
            .bind(&input.city)
            .bind(&input.header_image)
            .bind(&input.guest_capacity)
            .bind(&input.catering)
            .bind(Json(&input.ceremony_options))
            .bind(Json(&input.amenities))
            .bind(input.price_from)
            .bind(&input.price_notes)
            .bind(input.published)
            .bind(input.featured)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| RepoError::from_slug_write(e, ENTITY, &input.slug))?;

        let saved = Self::write_children_inner(&mut tx, venue, input).await?;

        tx.commit().await?;
        Ok(saved)
    }

    /// Find a venue by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Venue>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM venues WHERE id = $1");
        sqlx::query_as::<_, Venue>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a venue by slug, whatever its published state.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Venue>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM venues WHERE slug = $1");
        sqlx::query_as::<_, Venue>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Find a venue by ID with gallery and films attached.
    pub async fn find_detail_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<VenueDetail>, sqlx::Error> {
        match Self::find_by_id(pool, id).await? {
            Some(venue) => Self::attach_children(pool, venue).await.map(Some),
            None => Ok(None),
        }
    }

    /// Find a venue by slug with gallery and films attached.
    pub async fn find_detail_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<VenueDetail>, sqlx::Error> {
        match Self::find_by_slug(pool, slug).await? {
            Some(venue) => Self::attach_children(pool, venue).await.map(Some),
            None => Ok(None),
        }
    }

    /// List every venue in listing order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Venue>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM venues ORDER BY {LISTING_ORDER}");
        sqlx::query_as::<_, Venue>(&query).fetch_all(pool).await
    }

    /// List published venues in listing order.
    pub async fn list_published(pool: &PgPool) -> Result<Vec<Venue>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM venues \
             WHERE published = true \
             ORDER BY {LISTING_ORDER}"
        );
        sqlx::query_as::<_, Venue>(&query).fetch_all(pool).await
    }

    /// Replace every field, the gallery and the film associations of a venue.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &VenueInput,
    ) -> Result<Option<Updated<SavedVenue>>, RepoError> {
        let mut tx = pool.begin().await?;

        let Some(previous_slug) = lock_slug(&mut tx, "venues", id).await? else {
            return Ok(None);
        };

        if slug_taken(&mut tx, "venues", &input.slug, Some(id)).await? {
            return Err(RepoError::DuplicateSlug {
                entity: ENTITY,
                slug: input.slug.clone(),
            });
        }

        let update_query = format!(
            "UPDATE venues SET \
                slug = $2, venue_title = $3, short_description = $4, expanded_text = $5, \
                address = $6, phone = $7, website = $8, city = $9, header_image = $10, \
                guest_capacity = $11, catering = $12, ceremony_options = $13, \
                amenities = $14, price_from = $15, price_notes = $16, published = $17, \
                featured = $18, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let venue = sqlx::query_as::<_, Venue>(&update_query)
            .bind(id)
            .bind(&input.slug)
            .bind(&input.venue_title)
            .bind(&input.short_description)
            .bind(&input.expanded_text)
            .bind(&input.address)
            .bind(&input.phone)
            .bind(&input.website)
            .bind(&input.city)
            .bind(&input.header_image)
            .bind(&input.guest_capacity)
            .bind(&input.catering)
            .bind(Json(&input.ceremony_options))
            .bind(Json(&input.amenities))
            .bind(input.price_from)
            .bind(&input.price_notes)
            .bind(input.published)
            .bind(input.featured)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| RepoError::from_slug_write(e, ENTITY, &input.slug))?;

        let saved = Self::write_children_inner(&mut tx, venue, input).await?;

        tx.commit().await?;
        Ok(Some(Updated {
            row: saved,
            previous_slug,
        }))
    }

    /// Delete a venue with its gallery and film associations.
    ///
    /// The films themselves stay; they simply lose their venue.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<Venue>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        GalleryRepo::delete_inner(&mut tx, GalleryOwner::Venue(id)).await?;
        VenueFilmRepo::delete_for_venue_inner(&mut tx, id).await?;

        let query = format!("DELETE FROM venues WHERE id = $1 RETURNING {COLUMNS}");
        let venue = sqlx::query_as::<_, Venue>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(venue)
    }

    /// Flip `published` and bump `updated_at`.
    pub async fn toggle_published(pool: &PgPool, id: DbId) -> Result<Option<Venue>, sqlx::Error> {
        let query = format!(
            "UPDATE venues SET published = NOT published, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Venue>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Flip `featured` and bump `updated_at`.
    pub async fn toggle_featured(pool: &PgPool, id: DbId) -> Result<Option<Venue>, sqlx::Error> {
        let query = format!(
            "UPDATE venues SET featured = NOT featured, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Venue>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn attach_children(pool: &PgPool, venue: Venue) -> Result<VenueDetail, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::attach_children_inner(&mut conn, venue).await
    }

    async fn attach_children_inner(
        conn: &mut PgConnection,
        venue: Venue,
    ) -> Result<VenueDetail, sqlx::Error> {
        let gallery = GalleryRepo::list_inner(conn, GalleryOwner::Venue(venue.id)).await?;
        let films = VenueFilmRepo::list_films_for_venue_inner(conn, venue.id).await?;
        Ok(VenueDetail {
            venue,
            gallery,
            films,
        })
    }

    /// Replace gallery and film associations, then read the venue back
    /// within the same transaction.
    async fn write_children_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        venue: Venue,
        input: &VenueInput,
    ) -> Result<SavedVenue, sqlx::Error> {
        GalleryRepo::replace_inner(tx, GalleryOwner::Venue(venue.id), &input.gallery).await?;
        let detached_from =
            VenueFilmRepo::set_films_for_venue_inner(tx, venue.id, &input.film_ids).await?;
        let detail = Self::attach_children_inner(&mut **tx, venue).await?;
        Ok(SavedVenue {
            detail,
            detached_from,
        })
    }
}
