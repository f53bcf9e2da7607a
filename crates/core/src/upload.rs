//! Image upload rules: acceptance checks, storage key generation and
//! content-type inference.
//!
//! The original filename never reaches the object store. Only its extension
//! survives, appended to a random UUID, optionally under a sanitized folder.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default upload size limit (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Content type used when the extension is not in [`CONTENT_TYPES`].
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Longest extension carried over into a storage key.
const MAX_EXTENSION_LEN: usize = 10;

/// Extension -> content type lookup.
const CONTENT_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("webp", "image/webp"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("avif", "image/avif"),
    ("heic", "image/heic"),
    ("ico", "image/x-icon"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Result of one successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedAsset {
    /// Public, CDN-facing address of the object.
    pub url: String,
    /// Durable storage handle, required to delete the object later.
    pub key: String,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check the declared MIME type and size of an incoming file.
///
/// The type is checked first: a non-image is `InvalidFile` whatever its size.
pub fn validate_image(content_type: Option<&str>, size: u64, max_bytes: u64) -> Result<(), CoreError> {
    let mime = content_type.map(str::trim).unwrap_or_default();
    if !mime.to_ascii_lowercase().starts_with("image/") {
        let shown = if mime.is_empty() { "unknown" } else { mime };
        return Err(CoreError::InvalidFile(format!(
            "Only image files can be uploaded (got {shown})"
        )));
    }
    if size > max_bytes {
        return Err(CoreError::FileTooLarge { size, max: max_bytes });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Keys and content types
// ---------------------------------------------------------------------------

/// Lowercased extension of `file_name`, if it is short and alphanumeric.
pub fn extension_of(file_name: &str) -> Option<String> {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let (stem, ext) = base.rsplit_once('.')?;
    if stem.is_empty()
        || ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Content type for an extension, falling back to `application/octet-stream`.
pub fn content_type_for_extension(ext: Option<&str>) -> &'static str {
    ext.and_then(|ext| {
        CONTENT_TYPES
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(ext))
            .map(|(_, content_type)| *content_type)
    })
    .unwrap_or(FALLBACK_CONTENT_TYPE)
}

/// Reduce a folder hint to safe lowercase path segments.
///
/// Returns `None` when nothing usable remains.
pub fn sanitize_folder(folder: &str) -> Option<String> {
    let segments: Vec<String> = folder
        .split(['/', '\\'])
        .map(|s| {
            s.trim()
                .to_ascii_lowercase()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
                .collect::<String>()
        })
        .filter(|s| !s.is_empty())
        .collect();

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

/// Build a fresh storage key for `file_name`, namespaced under `folder`.
pub fn generate_key(file_name: &str, folder: Option<&str>) -> String {
    let id = Uuid::new_v4();
    let name = match extension_of(file_name) {
        Some(ext) => format!("{id}.{ext}"),
        None => id.to_string(),
    };
    match folder.and_then(sanitize_folder) {
        Some(folder) => format!("{folder}/{name}"),
        None => name,
    }
}

/// Join the configured public base URL and a key.
pub fn public_url(base_url: &str, key: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), key.trim_start_matches('/'))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const MIB: u64 = 1024 * 1024;

    #[test]
    fn accepts_image_within_limit() {
        assert!(validate_image(Some("image/jpeg"), 2 * MIB, DEFAULT_MAX_UPLOAD_BYTES).is_ok());
        assert!(validate_image(Some("IMAGE/PNG"), 0, DEFAULT_MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn limit_is_inclusive() {
        assert!(validate_image(Some("image/webp"), 10 * MIB, DEFAULT_MAX_UPLOAD_BYTES).is_ok());
        assert_matches!(
            validate_image(Some("image/webp"), 10 * MIB + 1, DEFAULT_MAX_UPLOAD_BYTES),
            Err(CoreError::FileTooLarge { .. })
        );
    }

    #[test]
    fn rejects_non_image_types() {
        assert_matches!(
            validate_image(Some("text/plain"), 10, DEFAULT_MAX_UPLOAD_BYTES),
            Err(CoreError::InvalidFile(_))
        );
        assert_matches!(
            validate_image(None, 10, DEFAULT_MAX_UPLOAD_BYTES),
            Err(CoreError::InvalidFile(_))
        );
    }

    #[test]
    fn type_is_checked_before_size() {
        assert_matches!(
            validate_image(Some("application/pdf"), 15 * MIB, DEFAULT_MAX_UPLOAD_BYTES),
            Err(CoreError::InvalidFile(_))
        );
    }

    #[test]
    fn extension_is_lowercased_and_bounded() {
        assert_eq!(extension_of("Ceremony.JPG").as_deref(), Some("jpg"));
        assert_eq!(extension_of("a.b.webp").as_deref(), Some("webp"));
        assert_eq!(extension_of("noext"), None);
        assert_eq!(extension_of(".hidden"), None);
        assert_eq!(extension_of("x.verylongextension"), None);
        assert_eq!(extension_of("x.p%g"), None);
        assert_eq!(extension_of("../../etc/passwd.png").as_deref(), Some("png"));
    }

    #[test]
    fn content_type_lookup_with_fallback() {
        assert_eq!(content_type_for_extension(Some("jpeg")), "image/jpeg");
        assert_eq!(content_type_for_extension(Some("SVG")), "image/svg+xml");
        assert_eq!(content_type_for_extension(Some("xyz")), FALLBACK_CONTENT_TYPE);
        assert_eq!(content_type_for_extension(None), FALLBACK_CONTENT_TYPE);
    }

    #[test]
    fn folder_is_sanitized() {
        assert_eq!(sanitize_folder("films/Elena").as_deref(), Some("films/elena"));
        assert_eq!(sanitize_folder("../../secret").as_deref(), Some("secret"));
        assert_eq!(sanitize_folder("venues//gallery/").as_deref(), Some("venues/gallery"));
        assert_eq!(sanitize_folder("../.."), None);
        assert_eq!(sanitize_folder(""), None);
    }

    #[test]
    fn generated_keys_drop_the_original_name() {
        let key = generate_key("Elena & Lachlan.JPG", Some("films"));
        assert!(key.starts_with("films/"));
        assert!(key.ends_with(".jpg"));
        assert!(!key.contains("Elena"));
        // folder + uuid (36 chars) + ".jpg"
        assert_eq!(key.len(), "films/".len() + 36 + 4);
    }

    #[test]
    fn generated_keys_are_unique_for_the_same_name() {
        let a = generate_key("same.png", None);
        let b = generate_key("same.png", None);
        assert_ne!(a, b);
    }

    #[test]
    fn key_without_extension_is_bare_uuid() {
        let key = generate_key("README", None);
        assert_eq!(key.len(), 36);
        assert!(Uuid::parse_str(&key).is_ok());
    }

    #[test]
    fn public_url_joins_without_double_slash() {
        assert_eq!(public_url("https://cdn.example.com/", "films/a.jpg"), "https://cdn.example.com/films/a.jpg");
        assert_eq!(public_url("https://cdn.example.com", "a.jpg"), "https://cdn.example.com/a.jpg");
    }
}
