//! Bearer token guard for the admin surface.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use vowreel_core::error::CoreError;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Signed-in studio operator, taken from the `Authorization: Bearer` token.
///
/// Admin handlers list it first among their extractors. A request without a
/// valid token is turned away before its body is parsed or the database is
/// queried.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Session provider user id (`sub` claim).
    pub subject: String,
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}

/// Token part of an `Authorization: Bearer <token>` header. The scheme is
/// matched case-insensitively.
fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    match header.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => Err(unauthorized(
            "Invalid Authorization format. Expected: Bearer <token>",
        )),
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        let claims = validate_token(token, &state.config.jwt).map_err(|e| {
            tracing::debug!(error = %e, path = %parts.uri.path(), "Rejected session token");
            unauthorized("Invalid or expired session")
        })?;

        Ok(AuthUser {
            subject: claims.sub,
        })
    }
}
