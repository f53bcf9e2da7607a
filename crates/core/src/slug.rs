//! Slug rules shared by films, venues and blog posts.
//!
//! A slug is the public, URL-safe identifier of a content row: lowercase
//! ASCII letters and digits in hyphen-separated groups.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

/// Maximum slug length in characters.
pub const MAX_SLUG_LEN: usize = 200;

static SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"));

/// Whether `slug` is non-empty, within [`MAX_SLUG_LEN`] and URL-safe.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slug.len() <= MAX_SLUG_LEN && SLUG_RE.is_match(slug)
}

/// `validator` custom rule for slug fields.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if is_valid_slug(slug) {
        return Ok(());
    }
    let mut err = ValidationError::new("slug");
    err.message = Some(Cow::Borrowed(
        "must be lowercase letters, digits and single hyphens (e.g. elena-and-lachlan)",
    ));
    Err(err)
}
