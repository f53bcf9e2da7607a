//! Film entity model and DTOs.
//!
//! A film is one wedding video with its story, vendor credits, a still
//! gallery and optionally the venue it was shot at.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vowreel_core::types::{DbId, Timestamp};

use super::gallery_image::{GalleryImage, GalleryImageInput};
use super::vendor::{Vendor, VendorInput};
use super::venue::VenueSummary;

/// A row from the `films` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Film {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub tagline: Option<String>,
    pub location: Option<String>,
    pub header_image: Option<String>,
    pub video_url: Option<String>,
    pub trailer_url: Option<String>,
    pub story_content: Option<String>,
    pub published: bool,
    pub featured: bool,
    pub sort_order: i32,
    pub rating: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Short form of a film, used on venue pages.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FilmSummary {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub header_image: Option<String>,
    pub published: bool,
}

/// A film with every child collection attached.
#[derive(Debug, Clone, Serialize)]
pub struct FilmDetail {
    #[serde(flatten)]
    pub film: Film,
    pub vendors: Vec<Vendor>,
    pub gallery: Vec<GalleryImage>,
    pub venue: Option<VenueSummary>,
}

/// DTO for creating or fully replacing a film.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FilmInput {
    #[validate(
        length(min = 1, max = 200),
        custom(function = "vowreel_core::slug::validate_slug")
    )]
    pub slug: String,
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[validate(length(max = 300))]
    pub subtitle: Option<String>,
    #[validate(length(max = 300))]
    pub tagline: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    pub header_image: Option<String>,
    #[validate(url)]
    pub video_url: Option<String>,
    #[validate(url)]
    pub trailer_url: Option<String>,
    pub story_content: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default)]
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: f64,
    /// Vendor credits in display order.
    #[serde(default)]
    #[validate(nested)]
    pub vendors: Vec<VendorInput>,
    /// Gallery images in display order.
    #[serde(default)]
    #[validate(nested)]
    pub gallery: Vec<GalleryImageInput>,
    /// Venue the film was shot at, if any.
    pub venue_id: Option<DbId>,
}
