//! Image upload pipeline: validate, key, store, return `{url, key}`.

use std::sync::Arc;

use vowreel_core::error::CoreError;
use vowreel_core::upload::{
    content_type_for_extension, extension_of, generate_key, public_url, validate_image,
    UploadedAsset,
};

use crate::store::{ObjectStore, StoreError};

/// A file received from the admin client.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Original client-side name. Only its extension is kept.
    pub file_name: String,
    /// MIME type declared by the client.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Result of one file in a batch upload.
#[derive(Debug)]
pub struct BatchUploadOutcome {
    pub file_name: String,
    pub result: Result<UploadedAsset, CoreError>,
}

/// Validates and stores uploaded images.
///
/// Built once at startup and shared through the application state.
pub struct AssetUploader {
    store: Arc<dyn ObjectStore>,
    public_base_url: String,
    max_bytes: u64,
}

impl AssetUploader {
    pub fn new(store: Arc<dyn ObjectStore>, public_base_url: impl Into<String>, max_bytes: u64) -> Self {
        Self {
            store,
            public_base_url: public_base_url.into(),
            max_bytes,
        }
    }

    /// Validate and store one image under a fresh key.
    ///
    /// Invalid files are rejected before the store is touched.
    pub async fn upload(&self, file: UploadFile, folder: Option<&str>) -> Result<UploadedAsset, CoreError> {
        validate_image(file.content_type.as_deref(), file.bytes.len() as u64, self.max_bytes)?;

        let key = generate_key(&file.file_name, folder);
        let content_type = content_type_for_extension(extension_of(&file.file_name).as_deref());
        let size = file.bytes.len();

        self.store
            .put(&key, file.bytes, content_type)
            .await
            .map_err(|e| {
                tracing::error!(key = %key, error = %e, "Object store write failed");
                CoreError::StoreUnavailable(e.to_string())
            })?;

        tracing::info!(key = %key, size, content_type, "Image uploaded");

        Ok(UploadedAsset {
            url: public_url(&self.public_base_url, &key),
            key,
        })
    }

    /// Upload files one at a time.
    ///
    /// A failing file does not stop the batch and files already stored stay.
    pub async fn upload_batch(&self, files: Vec<UploadFile>, folder: Option<&str>) -> Vec<BatchUploadOutcome> {
        let mut outcomes = Vec::with_capacity(files.len());
        for file in files {
            let file_name = file.file_name.clone();
            let result = self.upload(file, folder).await;
            if let Err(e) = &result {
                tracing::debug!(file_name = %file_name, error = %e, "Batch item rejected");
            }
            outcomes.push(BatchUploadOutcome { file_name, result });
        }
        outcomes
    }

    /// Remove a stored object. A missing object counts as deleted.
    pub async fn delete(&self, key: &str) -> Result<(), CoreError> {
        let key = key.trim();
        if key.is_empty() || key.starts_with('/') || key.split('/').any(|s| s == "..") {
            return Err(CoreError::Validation(format!("Invalid storage key '{key}'")));
        }

        match self.store.delete(key).await {
            Ok(()) => {}
            Err(StoreError::NotFound(_)) => {
                tracing::debug!(key = %key, "Object already absent");
            }
            Err(e) => {
                tracing::error!(key = %key, error = %e, "Object store delete failed");
                return Err(CoreError::StoreUnavailable(e.to_string()));
            }
        }

        tracing::info!(key = %key, "Image deleted");
        Ok(())
    }
}
