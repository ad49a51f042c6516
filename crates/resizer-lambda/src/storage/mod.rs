//! Object storage capability used by the handler.
//!
//! The handler only needs to fetch one object and store one object, so the
//! seam is a small async trait. [`S3ObjectStore`] is the production
//! implementation; tests substitute an in-memory store.

use async_trait::async_trait;
use thiserror::Error;

mod s3;

#[cfg(test)]
pub(crate) mod memory;

pub use s3::{part_ranges, S3ObjectStore, MIN_PART_SIZE};

/// Storage access errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("object not found: s3://{bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("failed to fetch s3://{bucket}/{key}: {message}")]
    Fetch {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("failed to store s3://{bucket}/{key}: {message}")]
    Store {
        bucket: String,
        key: String,
        message: String,
    },
}

/// Canned access policy applied to stored objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessPolicy {
    #[default]
    Private,
    PublicRead,
}

/// Bytes and metadata of a fetched object.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedObject {
    pub bytes: Vec<u8>,
    /// Content type recorded on the object, if any.
    pub content_type: Option<String>,
}

/// A write of one whole object.
#[derive(Debug, Clone, PartialEq)]
pub struct PutRequest {
    pub bucket: String,
    pub key: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub access: AccessPolicy,
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Read an object in full.
    async fn fetch(&self, bucket: &str, key: &str) -> Result<FetchedObject, StorageError>;

    /// Write an object, replacing any existing object under the same key.
    async fn store(&self, request: PutRequest) -> Result<(), StorageError>;
}
