//! Row structs, detail views and input DTOs.
//!
//! Each content submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A summary struct used when another aggregate links to it
//! - A `Deserialize` + `Validate` input DTO used for both create and update
//!   (updates replace every field and every child collection)

pub mod blog_post;
pub mod film;
pub mod gallery_image;
pub mod vendor;
pub mod venue;

/// Result of a successful update.
///
/// Carries the slug the row had before the update so callers can invalidate
/// the old public route when the slug changed.
#[derive(Debug, Clone)]
pub struct Updated<T> {
    pub row: T,
    pub previous_slug: String,
}
