//! In-memory [`ObjectStore`] for handler tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{FetchedObject, ObjectStore, PutRequest, StorageError};

#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    objects: Mutex<HashMap<(String, String), FetchedObject>>,
    puts: Mutex<Vec<PutRequest>>,
    fail_stores: bool,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail.
    pub(crate) fn failing_stores() -> Self {
        Self {
            fail_stores: true,
            ..Self::default()
        }
    }

    pub(crate) fn insert(&self, bucket: &str, key: &str, bytes: Vec<u8>, content_type: Option<&str>) {
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            FetchedObject {
                bytes,
                content_type: content_type.map(str::to_string),
            },
        );
    }

    /// Every write accepted so far, in order.
    pub(crate) fn puts(&self) -> Vec<PutRequest> {
        self.puts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<FetchedObject, StorageError> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    async fn store(&self, request: PutRequest) -> Result<(), StorageError> {
        if self.fail_stores {
            return Err(StorageError::Store {
                bucket: request.bucket,
                key: request.key,
                message: "injected failure".to_string(),
            });
        }

        self.insert(
            &request.bucket,
            &request.key,
            request.bytes.clone(),
            Some(&request.content_type),
        );
        self.puts.lock().unwrap().push(request);
        Ok(())
    }
}
