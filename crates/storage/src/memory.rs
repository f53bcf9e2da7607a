//! Process-local object store.
//!
//! Used with `STORAGE_BACKEND=memory` for local development and by tests,
//! which also read the put counter to check that rejected files never
//! reached storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::store::{ObjectStore, StoreError};

/// An object held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// [`ObjectStore`] keeping objects in a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    objects: Mutex<HashMap<String, StoredObject>>,
    puts: AtomicUsize,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the object under `key`, if any.
    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.lock().get(key).cloned()
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of `put` calls so far.
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, StoredObject>> {
        // A poisoned map is still consistent: every write is a single insert/remove.
        self.objects.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StoreError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        self.lock().insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        match self.lock().remove(key) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(key.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn put_then_delete() {
        let store = InMemoryObjectStore::new();
        store.put("films/a.jpg", vec![1, 2, 3], "image/jpeg").await.unwrap();

        let object = store.get("films/a.jpg").unwrap();
        assert_eq!(object.bytes, vec![1, 2, 3]);
        assert_eq!(object.content_type, "image/jpeg");
        assert_eq!(store.put_count(), 1);

        store.delete("films/a.jpg").await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn deleting_missing_key_reports_not_found() {
        let store = InMemoryObjectStore::new();
        assert_matches!(store.delete("nope").await, Err(StoreError::NotFound(_)));
    }
}
