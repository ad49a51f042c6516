//! Object-created event handling.

use std::sync::Arc;

use resizer_core::{ImageTransform, ResizeSettings, JPEG_CONTENT_TYPE};

use crate::error::HandlerError;
use crate::event::{ObjectRef, S3Event};
use crate::storage::{AccessPolicy, ObjectStore, PutRequest, StorageError};

/// Resizes the object named by an S3 notification and stores the result
/// next to it.
pub struct ResizeHandler<S> {
    store: S,
    transform: Arc<ImageTransform>,
}

impl<S: ObjectStore> ResizeHandler<S> {
    pub fn new(store: S, settings: ResizeSettings) -> Self {
        Self {
            store,
            transform: Arc::new(ImageTransform::new(settings)),
        }
    }

    pub fn settings(&self) -> &ResizeSettings {
        self.transform.settings()
    }

    /// Handle one notification.
    ///
    /// Returns the content type of the source object, or `None` when there
    /// was nothing to do: an empty notification, or an object that is
    /// itself a resized copy. Errors are logged and returned unchanged so
    /// the runtime can report the invocation as failed.
    pub async fn handle(&self, event: &S3Event) -> Result<Option<String>, HandlerError> {
        let Some(object) = event.first_object() else {
            tracing::warn!("notification carried no records");
            return Ok(None);
        };

        if self.settings().is_output_key(&object.key) {
            tracing::info!(
                bucket = %object.bucket,
                key = %object.key,
                "skipping object that is already a resized copy"
            );
            return Ok(None);
        }

        self.resize_object(&object).await.inspect_err(|err| {
            if matches!(err, HandlerError::Storage(StorageError::NotFound { .. })) {
                tracing::error!(
                    bucket = %object.bucket,
                    key = %object.key,
                    error = %err,
                    "object not found; check it exists and the bucket is in this function's region"
                );
            } else {
                tracing::error!(
                    bucket = %object.bucket,
                    key = %object.key,
                    error = %err,
                    "failed to resize object"
                );
            }
        })
    }

    async fn resize_object(&self, object: &ObjectRef) -> Result<Option<String>, HandlerError> {
        let fetched = self.store.fetch(&object.bucket, &object.key).await?;
        tracing::info!(
            bucket = %object.bucket,
            key = %object.key,
            len = fetched.bytes.len(),
            content_type = ?fetched.content_type,
            "fetched object"
        );

        let transform = Arc::clone(&self.transform);
        let input = fetched.bytes;
        let resized = tokio::task::spawn_blocking(move || transform.process(&input)).await??;

        let output_key = self.settings().output_key(&object.key);
        tracing::info!(
            bucket = %object.bucket,
            key = %output_key,
            width = resized.width,
            height = resized.height,
            rotation = ?resized.rotation,
            len = resized.bytes.len(),
            "storing resized image"
        );

        self.store
            .store(PutRequest {
                bucket: object.bucket.clone(),
                key: output_key,
                bytes: resized.bytes,
                content_type: JPEG_CONTENT_TYPE.to_string(),
                access: AccessPolicy::PublicRead,
            })
            .await?;

        Ok(fetched.content_type)
    }
}
