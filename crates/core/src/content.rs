//! Content aggregate kinds and the public routes they render on.
//!
//! After a mutation the frontend must recompute the listing page of the
//! content type and the slug-addressed detail page. [`ContentKind`] knows
//! both shapes so handlers only name the kind and slug(s) involved.

use serde::{Deserialize, Serialize};

/// Public homepage route (renders film highlights).
pub const HOME_PATH: &str = "/";

/// The three content aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Film,
    Venue,
    BlogPost,
}

impl ContentKind {
    /// Entity name used in error messages and logs.
    pub fn entity(self) -> &'static str {
        match self {
            Self::Film => "Film",
            Self::Venue => "Venue",
            Self::BlogPost => "BlogPost",
        }
    }

    /// Public index (listing) route.
    pub fn index_path(self) -> &'static str {
        match self {
            Self::Film => "/films",
            Self::Venue => "/venues",
            Self::BlogPost => "/blog",
        }
    }

    /// Public detail route for `slug`.
    pub fn detail_path(self, slug: &str) -> String {
        format!("{}/{slug}", self.index_path())
    }

    /// Routes to recompute after a mutation touching `slugs`.
    ///
    /// Always includes the index route; films also include the homepage.
    /// Duplicate slugs (e.g. an update that kept its slug) collapse.
    pub fn affected_paths<'a>(self, slugs: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut paths = vec![self.index_path().to_string()];
        if self == Self::Film {
            paths.push(HOME_PATH.to_string());
        }
        for slug in slugs {
            let path = self.detail_path(slug);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
        paths
    }
}
