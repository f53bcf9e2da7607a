//! Venue entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;
use vowreel_core::types::{DbId, Timestamp};

use super::film::FilmSummary;
use super::gallery_image::{GalleryImage, GalleryImageInput};

/// A row from the `venues` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Venue {
    pub id: DbId,
    pub slug: String,
    pub venue_title: String,
    pub short_description: Option<String>,
    pub expanded_text: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub city: Option<String>,
    pub header_image: Option<String>,
    pub guest_capacity: Option<String>,
    pub catering: Option<String>,
    pub ceremony_options: Json<Vec<String>>,
    pub amenities: Json<Vec<String>>,
    pub price_from: Option<i32>,
    pub price_notes: Option<String>,
    pub published: bool,
    pub featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Short form of a venue, attached to film pages.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VenueSummary {
    pub id: DbId,
    pub slug: String,
    pub venue_title: String,
    pub city: Option<String>,
    pub header_image: Option<String>,
    pub published: bool,
}

/// A venue with its gallery and the films shot there, in association order.
#[derive(Debug, Clone, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    pub gallery: Vec<GalleryImage>,
    pub films: Vec<FilmSummary>,
}

/// A venue as it stands after a write, plus the venues that lost films to it.
#[derive(Debug, Clone)]
pub struct SavedVenue {
    pub detail: VenueDetail,
    pub detached_from: Vec<VenueSummary>,
}

/// DTO for creating or fully replacing a venue.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VenueInput {
    #[validate(
        length(min = 1, max = 200),
        custom(function = "vowreel_core::slug::validate_slug")
    )]
    pub slug: String,
    #[validate(length(min = 1, max = 300))]
    pub venue_title: String,
    #[validate(length(max = 1000))]
    pub short_description: Option<String>,
    pub expanded_text: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    #[validate(length(max = 100))]
    pub city: Option<String>,
    pub header_image: Option<String>,
    #[validate(length(max = 200))]
    pub guest_capacity: Option<String>,
    #[validate(length(max = 500))]
    pub catering: Option<String>,
    #[serde(default)]
    pub ceremony_options: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[validate(range(min = 0))]
    pub price_from: Option<i32>,
    #[validate(length(max = 500))]
    pub price_notes: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    #[validate(nested)]
    pub gallery: Vec<GalleryImageInput>,
    /// Films shot at this venue, in display order. Replaces the association;
    /// a listed film is detached from any other venue first.
    #[serde(default)]
    pub film_ids: Vec<DbId>,
}
