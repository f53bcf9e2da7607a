//! Gallery images owned by a film or a venue.
//!
//! Both owners share the same row shape; only the table and the owner column
//! differ (`film_gallery_images.film_id`, `venue_gallery_images.venue_id`).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vowreel_core::types::{DbId, Timestamp};

/// A row from `film_gallery_images` or `venue_gallery_images`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GalleryImage {
    pub id: DbId,
    pub url: String,
    pub alt: Option<String>,
    /// Object store key, kept so the image can be deleted from storage later.
    pub storage_key: Option<String>,
    pub sort_order: i32,
    pub created_at: Timestamp,
}

/// One gallery image as submitted by the admin form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GalleryImageInput {
    #[validate(length(min = 1, max = 2048))]
    pub url: String,
    #[validate(length(max = 300))]
    pub alt: Option<String>,
    #[validate(length(max = 512))]
    pub storage_key: Option<String>,
}
