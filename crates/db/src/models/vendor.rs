//! Vendor credits listed on a film page (planner, florist, venue stylist...).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vowreel_core::types::{DbId, Timestamp};

/// A row from the `film_vendors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vendor {
    pub id: DbId,
    pub film_id: DbId,
    pub role: String,
    pub name: String,
    pub link: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

/// One vendor credit as submitted by the admin form.
///
/// Position in the submitted list becomes `sort_order`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VendorInput {
    #[validate(length(min = 1, max = 100))]
    pub role: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(url)]
    pub link: Option<String>,
}
