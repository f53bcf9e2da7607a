//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Multi-statement writes run in a
//! single transaction; child repositories expose `*_inner` helpers that
//! take the caller's transaction.

use sqlx::PgConnection;
use vowreel_core::types::DbId;

pub mod blog_post_repo;
pub mod film_repo;
pub mod gallery_repo;
pub mod vendor_repo;
pub mod venue_film_repo;
pub mod venue_repo;

pub use blog_post_repo::BlogPostRepo;
pub use film_repo::FilmRepo;
pub use gallery_repo::{GalleryOwner, GalleryRepo};
pub use vendor_repo::VendorRepo;
pub use venue_film_repo::VenueFilmRepo;
pub use venue_repo::VenueRepo;

/// Whether `slug` is already used in `table` by a row other than `exclude_id`.
pub(crate) async fn slug_taken(
    conn: &mut PgConnection,
    table: &'static str,
    slug: &str,
    exclude_id: Option<DbId>,
) -> Result<bool, sqlx::Error> {
    let query = format!(
        "SELECT EXISTS(\
            SELECT 1 FROM {table} WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2)\
         )"
    );
    sqlx::query_scalar::<_, bool>(&query)
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(conn)
        .await
}

/// Lock the row `id` in `table` and return its current slug.
pub(crate) async fn lock_slug(
    conn: &mut PgConnection,
    table: &'static str,
    id: DbId,
) -> Result<Option<String>, sqlx::Error> {
    let query = format!("SELECT slug FROM {table} WHERE id = $1 FOR UPDATE");
    sqlx::query_scalar::<_, String>(&query)
        .bind(id)
        .fetch_optional(conn)
        .await
}
