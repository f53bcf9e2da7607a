//! Admin handlers for image uploads.
//!
//! Files arrive as `multipart/form-data`: one or more `file` parts and an
//! optional `folder` text part used as a key prefix.

use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;
use vowreel_core::asset_list::{self, ArrangeAction, AssetEntry};
use vowreel_storage::UploadFile;

use crate::error::{classify_core_error, AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// Multipart field names carrying file data.
const FILE_FIELDS: &[&str] = &["file", "files"];
const FOLDER_FIELD: &str = "folder";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub key: Option<String>,
}

/// Body of `POST /uploads/arrange`: the current list plus one step.
#[derive(Debug, Deserialize, Validate)]
pub struct ArrangeRequest {
    pub items: Vec<AssetEntry>,
    #[serde(flatten)]
    pub action: ArrangeAction,
}

/// Per-file entry of a batch upload response.
#[derive(Debug, Serialize)]
pub struct BatchItem {
    pub file_name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct BatchSummary {
    pub uploaded: usize,
    pub failed: usize,
    pub results: Vec<BatchItem>,
}

#[derive(Debug, Serialize)]
pub struct DeletedObject {
    pub key: String,
}

struct UploadForm {
    files: Vec<UploadFile>,
    folder: Option<String>,
}

async fn read_upload_form(mut multipart: Multipart) -> AppResult<UploadForm> {
    let mut files = Vec::new();
    let mut folder = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == FOLDER_FIELD {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            folder = Some(value);
        } else if FILE_FIELDS.contains(&name.as_str()) {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.body_text()))?;
            files.push(UploadFile {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
        }
    }

    Ok(UploadForm { files, folder })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/admin/uploads
///
/// Store a single image and return `{url, key}`.
pub async fn upload(
    user: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = read_upload_form(multipart).await?;
    let file = form
        .files
        .into_iter()
        .next()
        .ok_or_else(|| AppError::BadRequest("Missing 'file' field".to_string()))?;

    let asset = state.uploader.upload(file, form.folder.as_deref()).await?;
    tracing::debug!(key = %asset.key, user = %user.subject, "Upload accepted");

    Ok((StatusCode::CREATED, Json(SuccessResponse::new(asset))))
}

/// POST /api/v1/admin/uploads/batch
///
/// Store every `file` part. Failures are reported per file.
pub async fn upload_batch(
    user: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let form = read_upload_form(multipart).await?;
    if form.files.is_empty() {
        return Err(AppError::BadRequest("Missing 'file' field".to_string()));
    }

    let outcomes = state
        .uploader
        .upload_batch(form.files, form.folder.as_deref())
        .await;

    let results: Vec<BatchItem> = outcomes
        .into_iter()
        .map(|outcome| match outcome.result {
            Ok(asset) => BatchItem {
                file_name: outcome.file_name,
                success: true,
                url: Some(asset.url),
                key: Some(asset.key),
                error: None,
                code: None,
            },
            Err(err) => {
                let (_, code, message) = classify_core_error(&err);
                BatchItem {
                    file_name: outcome.file_name,
                    success: false,
                    url: None,
                    key: None,
                    error: Some(message),
                    code: Some(code),
                }
            }
        })
        .collect();

    let uploaded = results.iter().filter(|item| item.success).count();
    let failed = results.len() - uploaded;
    tracing::info!(uploaded, failed, user = %user.subject, "Batch upload finished");

    Ok(Json(SuccessResponse::new(BatchSummary {
        uploaded,
        failed,
        results,
    })))
}

/// POST /api/v1/admin/uploads/arrange
///
/// Apply one move/remove step to a client-held asset list.
pub async fn arrange(
    _user: AuthUser,
    ValidatedJson(request): ValidatedJson<ArrangeRequest>,
) -> AppResult<impl IntoResponse> {
    let items = asset_list::apply(request.items, request.action);
    Ok(Json(SuccessResponse::new(items)))
}

/// DELETE /api/v1/admin/uploads?key=
///
/// Remove a stored object. Deleting an absent key succeeds.
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> AppResult<impl IntoResponse> {
    let key = params
        .key
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing 'key' query parameter".to_string()))?;

    state.uploader.delete(&key).await?;
    tracing::debug!(key = %key, user = %user.subject, "Upload deleted");

    Ok(Json(SuccessResponse::new(DeletedObject {
        key: key.trim().to_string(),
    })))
}
