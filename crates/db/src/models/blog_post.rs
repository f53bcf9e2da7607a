//! Blog post entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use vowreel_core::types::{DbId, Timestamp};

/// A row from the `blog_posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BlogPost {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    /// HTML body.
    pub content: String,
    pub image: Option<String>,
    pub category: Option<String>,
    pub post_date: NaiveDate,
    pub published: bool,
    pub featured: bool,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or fully replacing a blog post.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BlogPostInput {
    #[validate(
        length(min = 1, max = 200),
        custom(function = "vowreel_core::slug::validate_slug")
    )]
    pub slug: String,
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: String,
    pub image: Option<String>,
    #[validate(length(max = 100))]
    pub category: Option<String>,
    /// Defaults to today on create; kept as-is on update when omitted.
    pub post_date: Option<NaiveDate>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub featured: bool,
    #[validate(length(max = 200))]
    pub meta_title: Option<String>,
    #[validate(length(max = 500))]
    pub meta_description: Option<String>,
}
