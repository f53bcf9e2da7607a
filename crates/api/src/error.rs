use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vowreel_core::error::CoreError;
use vowreel_core::validation::FieldError;
use vowreel_db::RepoError;

/// PostgreSQL SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE for foreign key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";

const SANITIZED_MESSAGE: &str = "An internal error occurred";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce `{"success": false, "error", "code"}`
/// JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `vowreel_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::DuplicateSlug { entity, slug } => {
                AppError::Core(CoreError::DuplicateSlug { entity, slug })
            }
            RepoError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut fields: Option<&[FieldError]> = None;

        let (status, code, message) = match &self {
            AppError::Core(core) => {
                if let CoreError::InvalidFields(list) = core {
                    fields = Some(list.as_slice());
                }
                classify_core_error(core)
            }
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        if status.is_client_error() {
            tracing::debug!(status = status.as_u16(), code, error = %message, "Request rejected");
        }

        let mut body = json!({
            "success": false,
            "error": message,
            "code": code,
        });
        if let Some(fields) = fields {
            body["fields"] = json!(fields);
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a domain error into an HTTP status, error code, and message.
///
/// Also used by the batch upload handler to report per-file failures.
pub fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::NotFoundBySlug { entity, slug } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with slug '{slug}' not found"),
        ),
        CoreError::DuplicateSlug { .. } => (StatusCode::CONFLICT, "DUPLICATE_SLUG", err.to_string()),
        CoreError::InvalidFields(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "VALIDATION_ERROR",
            err.to_string(),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::InvalidFile(msg) => (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "INVALID_FILE",
            msg.clone(),
        ),
        CoreError::FileTooLarge { .. } => {
            (StatusCode::PAYLOAD_TOO_LARGE, "FILE_TOO_LARGE", err.to_string())
        }
        CoreError::StoreUnavailable(msg) => {
            tracing::error!(error = %msg, "Object store unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "STORE_UNAVAILABLE",
                "File storage is temporarily unavailable".to_string(),
            )
        }
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                SANITIZED_MESSAGE.to_string(),
            )
        }
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique violations on `uq_*_slug` map to 409 `DUPLICATE_SLUG`, other
///   `uq_*` constraints to 409 `CONFLICT`.
/// - Foreign key violations map to 400 `INVALID_REFERENCE`.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                Some(UNIQUE_VIOLATION) if vowreel_db::error::is_slug_violation(err) => {
                    return (
                        StatusCode::CONFLICT,
                        "DUPLICATE_SLUG",
                        "Slug is already in use".to_string(),
                    );
                }
                Some(UNIQUE_VIOLATION) if constraint.starts_with("uq_") => {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
                Some(FOREIGN_KEY_VIOLATION) => {
                    return (
                        StatusCode::BAD_REQUEST,
                        "INVALID_REFERENCE",
                        format!("Referenced row does not exist ({constraint})"),
                    );
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                SANITIZED_MESSAGE.to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                SANITIZED_MESSAGE.to_string(),
            )
        }
    }
}
