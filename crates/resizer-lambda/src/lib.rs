//! Resizer Lambda - S3 event handler for resizer-core
//!
//! When an object lands in a bucket, the handler fetches it, runs it through
//! [`resizer_core::ImageTransform`] and writes the JPEG result back to the
//! same bucket as `{key}.{suffix}.jpg`, publicly readable.
//!
//! # Module Structure
//!
//! - `config` - Environment-driven settings
//! - `event` - S3 notification payload
//! - `handler` - Fetch, transform, store
//! - `storage` - `ObjectStore` capability and its S3 implementation
//! - `logging` - tracing subscriber setup

pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod logging;
pub mod storage;

pub use config::{ConfigError, HandlerConfig};
pub use error::HandlerError;
pub use event::{ObjectRef, S3Event};
pub use handler::ResizeHandler;
pub use storage::{AccessPolicy, FetchedObject, ObjectStore, PutRequest, S3ObjectStore, StorageError};
