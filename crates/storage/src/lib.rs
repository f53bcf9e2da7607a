//! Object storage for uploaded images.
//!
//! - [`ObjectStore`] -- the `put`/`delete` seam every backend implements.
//! - [`S3ObjectStore`] -- S3-compatible backend (AWS, R2, MinIO).
//! - [`InMemoryObjectStore`] -- process-local backend for development and tests.
//! - [`AssetUploader`] -- validates files, assigns keys and builds public URLs.

pub mod memory;
pub mod s3;
pub mod store;
pub mod uploader;

pub use memory::InMemoryObjectStore;
pub use s3::{S3Config, S3ObjectStore};
pub use store::{ObjectStore, StoreError};
pub use uploader::{AssetUploader, BatchUploadOutcome, UploadFile};
