use crate::types::DbId;
use crate::validation::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Entity not found: {entity} with slug '{slug}'")]
    NotFoundBySlug { entity: &'static str, slug: String },

    #[error("{entity} with slug '{slug}' already exists")]
    DuplicateSlug { entity: &'static str, slug: String },

    /// Schema validation failed. Carries every failing field, not just the first.
    #[error("Validation failed: {}", crate::validation::summarize(.0))]
    InvalidFields(Vec<FieldError>),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid file: {0}")]
    InvalidFile(String),

    #[error("File is too large: {size} bytes exceeds the {max} byte limit")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Storage unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Whether this error is the server's fault rather than the caller's.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::StoreUnavailable(_) | Self::Internal(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_slug_message_names_entity_and_slug() {
        let err = CoreError::DuplicateSlug {
            entity: "Film",
            slug: "elena-and-lachlan".into(),
        };
        assert_eq!(
            err.to_string(),
            "Film with slug 'elena-and-lachlan' already exists"
        );
    }

    #[test]
    fn file_too_large_message_includes_limit() {
        let err = CoreError::FileTooLarge {
            size: 15 * 1024 * 1024,
            max: 10 * 1024 * 1024,
        };
        assert!(err.to_string().contains("10485760"));
    }

    #[test]
    fn invalid_fields_message_lists_every_field() {
        let err = CoreError::InvalidFields(vec![
            FieldError::new("slug", "must be lowercase"),
            FieldError::new("title", "must not be empty"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("slug: must be lowercase"));
        assert!(msg.contains("title: must not be empty"));
    }

    #[test]
    fn server_error_classification() {
        assert!(CoreError::StoreUnavailable("timeout".into()).is_server_error());
        assert!(CoreError::Internal("boom".into()).is_server_error());
        assert!(!CoreError::InvalidFile("text/plain".into()).is_server_error());
        assert!(!CoreError::NotFound { entity: "Venue", id: 1 }.is_server_error());
    }
}
