//! Repository for the `film_gallery_images` and `venue_gallery_images` tables.

use sqlx::{PgConnection, PgPool};
use vowreel_core::types::DbId;

use crate::models::gallery_image::{GalleryImage, GalleryImageInput};

/// Column list shared by both gallery tables (the owner column is omitted).
const COLUMNS: &str = "id, url, alt, storage_key, sort_order, created_at";

/// The aggregate a gallery belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryOwner {
    Film(DbId),
    Venue(DbId),
}

impl GalleryOwner {
    fn table(self) -> &'static str {
        match self {
            Self::Film(_) => "film_gallery_images",
            Self::Venue(_) => "venue_gallery_images",
        }
    }

    fn owner_column(self) -> &'static str {
        match self {
            Self::Film(_) => "film_id",
            Self::Venue(_) => "venue_id",
        }
    }

    fn id(self) -> DbId {
        match self {
            Self::Film(id) | Self::Venue(id) => id,
        }
    }
}

/// Gallery images of films and venues.
pub struct GalleryRepo;

impl GalleryRepo {
    /// List an owner's gallery in display order.
    pub async fn list(pool: &PgPool, owner: GalleryOwner) -> Result<Vec<GalleryImage>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::list_inner(&mut conn, owner).await
    }

    pub(crate) async fn list_inner(
        conn: &mut PgConnection,
        owner: GalleryOwner,
    ) -> Result<Vec<GalleryImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {table} \
             WHERE {column} = $1 \
             ORDER BY sort_order, id",
            table = owner.table(),
            column = owner.owner_column(),
        );
        sqlx::query_as::<_, GalleryImage>(&query)
            .bind(owner.id())
            .fetch_all(conn)
            .await
    }

    /// Replace an owner's gallery within an existing transaction.
    pub(crate) async fn replace_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        owner: GalleryOwner,
        images: &[GalleryImageInput],
    ) -> Result<(), sqlx::Error> {
        Self::delete_inner(tx, owner).await?;

        let insert = format!(
            "INSERT INTO {table} ({column}, url, alt, storage_key, sort_order) \
             VALUES ($1, $2, $3, $4, $5)",
            table = owner.table(),
            column = owner.owner_column(),
        );
        for (position, image) in images.iter().enumerate() {
            sqlx::query(&insert)
                .bind(owner.id())
                .bind(&image.url)
                .bind(&image.alt)
                .bind(&image.storage_key)
                .bind(position as i32)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }

    /// Delete an owner's whole gallery within an existing transaction.
    pub(crate) async fn delete_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        owner: GalleryOwner,
    ) -> Result<u64, sqlx::Error> {
        let query = format!(
            "DELETE FROM {table} WHERE {column} = $1",
            table = owner.table(),
            column = owner.owner_column(),
        );
        let result = sqlx::query(&query)
            .bind(owner.id())
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
