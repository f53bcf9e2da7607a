//! Repository error type.
//!
//! Absence is reported as `Ok(None)` / `Ok(false)` by the repositories, like
//! every other lookup in this crate. The only domain failure a repository
//! raises itself is a slug collision.

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("{entity} with slug '{slug}' already exists")]
    DuplicateSlug { entity: &'static str, slug: String },

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl RepoError {
    /// Map a unique violation on `uq_<table>_slug` to [`RepoError::DuplicateSlug`].
    ///
    /// The repositories check slugs before writing; this covers the race where
    /// another request inserts the same slug in between.
    pub(crate) fn from_slug_write(err: sqlx::Error, entity: &'static str, slug: &str) -> Self {
        if is_slug_violation(&err) {
            return Self::DuplicateSlug {
                entity,
                slug: slug.to_string(),
            };
        }
        Self::Database(err)
    }
}

/// Whether `err` is a unique violation on one of the `uq_*_slug` constraints.
pub fn is_slug_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
                && db_err
                    .constraint()
                    .is_some_and(|c| c.starts_with("uq_") && c.ends_with("_slug"))
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_database_errors_are_not_slug_violations() {
        assert!(!is_slug_violation(&sqlx::Error::RowNotFound));
    }

    #[test]
    fn from_slug_write_passes_other_errors_through() {
        let err = RepoError::from_slug_write(sqlx::Error::RowNotFound, "Film", "x");
        assert!(matches!(err, RepoError::Database(sqlx::Error::RowNotFound)));
    }
}
