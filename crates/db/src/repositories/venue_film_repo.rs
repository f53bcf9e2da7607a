//! Repository for the `venue_wedding_films` join table.
//!
//! A film is shot at no more than one venue (`uq_venue_wedding_films_film`);
//! a venue lists any number of films in its own order.

use std::collections::HashSet;

use sqlx::{PgConnection, PgPool};
use vowreel_core::types::DbId;

use crate::models::film::FilmSummary;
use crate::models::venue::VenueSummary;

/// Column list for film summaries (used in JOIN queries).
const FILM_SUMMARY_COLUMNS: &str = "f.id, f.slug, f.title, f.header_image, f.published";

/// Column list for venue summaries (used in JOIN queries).
const VENUE_SUMMARY_COLUMNS: &str =
    "v.id, v.slug, v.venue_title, v.city, v.header_image, v.published";

/// Venue <-> film association.
pub struct VenueFilmRepo;

impl VenueFilmRepo {
    /// The venue a film is attached to, if any.
    pub async fn find_venue_for_film(
        pool: &PgPool,
        film_id: DbId,
    ) -> Result<Option<VenueSummary>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::find_venue_for_film_inner(&mut conn, film_id).await
    }

    /// Films attached to a venue, in association order.
    pub async fn list_films_for_venue(
        pool: &PgPool,
        venue_id: DbId,
    ) -> Result<Vec<FilmSummary>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::list_films_for_venue_inner(&mut conn, venue_id).await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    pub(crate) async fn find_venue_for_film_inner(
        conn: &mut PgConnection,
        film_id: DbId,
    ) -> Result<Option<VenueSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {VENUE_SUMMARY_COLUMNS} \
             FROM venues v \
             JOIN venue_wedding_films vwf ON vwf.venue_id = v.id \
             WHERE vwf.film_id = $1"
        );
        sqlx::query_as::<_, VenueSummary>(&query)
            .bind(film_id)
            .fetch_optional(conn)
            .await
    }

    pub(crate) async fn list_films_for_venue_inner(
        conn: &mut PgConnection,
        venue_id: DbId,
    ) -> Result<Vec<FilmSummary>, sqlx::Error> {
        let query = format!(
            "SELECT {FILM_SUMMARY_COLUMNS} \
             FROM films f \
             JOIN venue_wedding_films vwf ON vwf.film_id = f.id \
             WHERE vwf.venue_id = $1 \
             ORDER BY vwf.sort_order, f.id"
        );
        sqlx::query_as::<_, FilmSummary>(&query)
            .bind(venue_id)
            .fetch_all(conn)
            .await
    }

    /// Point a film at `venue_id` (or at no venue) within a transaction.
    ///
    /// A film that stays at the same venue keeps its position. A film that
    /// moves goes to the end of the new venue's list.
    pub(crate) async fn set_venue_for_film_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        film_id: DbId,
        venue_id: Option<DbId>,
    ) -> Result<(), sqlx::Error> {
        let current = sqlx::query_scalar::<_, DbId>(
            "SELECT venue_id FROM venue_wedding_films WHERE film_id = $1",
        )
        .bind(film_id)
        .fetch_optional(&mut **tx)
        .await?;
        if current == venue_id {
            return Ok(());
        }

        Self::delete_for_film_inner(tx, film_id).await?;

        if let Some(venue_id) = venue_id {
            sqlx::query(
                "INSERT INTO venue_wedding_films (venue_id, film_id, sort_order) \
                 SELECT $1, $2, COALESCE(MAX(sort_order) + 1, 0) \
                 FROM venue_wedding_films WHERE venue_id = $1",
            )
            .bind(venue_id)
            .bind(film_id)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }

    /// Replace the films attached to a venue within a transaction.
    ///
    /// Each listed film is detached from any other venue before it is
    /// inserted. Repeated ids keep their first position. Returns the other
    /// venues that lost a film, each once.
    pub(crate) async fn set_films_for_venue_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        venue_id: DbId,
        film_ids: &[DbId],
    ) -> Result<Vec<VenueSummary>, sqlx::Error> {
        Self::delete_for_venue_inner(tx, venue_id).await?;

        let detach_query = format!(
            "WITH moved AS (\
                DELETE FROM venue_wedding_films WHERE film_id = $1 RETURNING venue_id\
             ) \
             SELECT {VENUE_SUMMARY_COLUMNS} FROM venues v JOIN moved ON moved.venue_id = v.id"
        );

        let mut detached_from: Vec<VenueSummary> = Vec::new();
        let mut seen = HashSet::new();
        let unique = film_ids.iter().copied().filter(|id| seen.insert(*id));
        for (position, film_id) in unique.enumerate() {
            let previous = sqlx::query_as::<_, VenueSummary>(&detach_query)
                .bind(film_id)
                .fetch_optional(&mut **tx)
                .await?;
            if let Some(previous) = previous {
                tracing::debug!(film_id, venue_id, from = previous.id, "Film moved from another venue");
                if detached_from.iter().all(|v| v.id != previous.id) {
                    detached_from.push(previous);
                }
            }
            sqlx::query(
                "INSERT INTO venue_wedding_films (venue_id, film_id, sort_order) \
                 VALUES ($1, $2, $3)",
            )
            .bind(venue_id)
            .bind(film_id)
            .bind(position as i32)
            .execute(&mut **tx)
            .await?;
        }

        Ok(detached_from)
    }

    pub(crate) async fn delete_for_film_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        film_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM venue_wedding_films WHERE film_id = $1")
            .bind(film_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }

    pub(crate) async fn delete_for_venue_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        venue_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM venue_wedding_films WHERE venue_id = $1")
            .bind(venue_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
