//! Repository for the `film_vendors` table.

use sqlx::{PgConnection, PgPool};
use vowreel_core::types::DbId;

use crate::models::vendor::{Vendor, VendorInput};

/// Column list for the `film_vendors` table.
const COLUMNS: &str = "id, film_id, role, name, link, sort_order, created_at";

/// Vendor credits of a film. Always replaced as a whole with the film.
pub struct VendorRepo;

impl VendorRepo {
    /// List a film's vendors in display order.
    pub async fn list_for_film(pool: &PgPool, film_id: DbId) -> Result<Vec<Vendor>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::list_for_film_inner(&mut conn, film_id).await
    }

    pub(crate) async fn list_for_film_inner(
        conn: &mut PgConnection,
        film_id: DbId,
    ) -> Result<Vec<Vendor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM film_vendors \
             WHERE film_id = $1 \
             ORDER BY sort_order, id"
        );
        sqlx::query_as::<_, Vendor>(&query)
            .bind(film_id)
            .fetch_all(conn)
            .await
    }

    /// Replace a film's vendors within an existing transaction.
    ///
    /// `sort_order` is the index in `vendors`, so it is always `0..n`.
    pub(crate) async fn replace_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        film_id: DbId,
        vendors: &[VendorInput],
    ) -> Result<(), sqlx::Error> {
        Self::delete_inner(tx, film_id).await?;

        for (position, vendor) in vendors.iter().enumerate() {
            sqlx::query(
                "INSERT INTO film_vendors (film_id, role, name, link, sort_order) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(film_id)
            .bind(&vendor.role)
            .bind(&vendor.name)
            .bind(&vendor.link)
            .bind(position as i32)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }

    /// Delete every vendor of a film within an existing transaction.
    pub(crate) async fn delete_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        film_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM film_vendors WHERE film_id = $1")
            .bind(film_id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected())
    }
}
