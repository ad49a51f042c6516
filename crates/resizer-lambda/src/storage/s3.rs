//! [`ObjectStore`] backed by Amazon S3.

use std::ops::Range;

use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart, ObjectCannedAcl, StorageClass};
use aws_sdk_s3::Client;
use bytes::Bytes;

use super::{AccessPolicy, FetchedObject, ObjectStore, PutRequest, StorageError};

/// Smallest part S3 accepts for any part but the last one.
pub const MIN_PART_SIZE: usize = 5 * 1024 * 1024;

/// S3 client wrapper that writes large objects with multipart uploads.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    part_size: usize,
}

impl S3ObjectStore {
    /// `part_size` is the multipart chunk size; payloads no larger than one
    /// part are written with a single `PutObject`.
    pub fn new(client: Client, part_size: usize) -> Self {
        Self {
            client,
            part_size: part_size.max(MIN_PART_SIZE),
        }
    }

    pub fn part_size(&self) -> usize {
        self.part_size
    }

    async fn put_single(&self, request: &PutRequest, body: Bytes) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(&request.bucket)
            .key(&request.key)
            .body(ByteStream::from(body))
            .content_type(&request.content_type)
            .acl(canned_acl(request.access))
            .storage_class(StorageClass::Standard)
            .send()
            .await
            .map_err(|e| store_error(request, e))?;
        Ok(())
    }

    async fn put_multipart(&self, request: &PutRequest, body: Bytes) -> Result<(), StorageError> {
        let created = self
            .client
            .create_multipart_upload()
            .bucket(&request.bucket)
            .key(&request.key)
            .content_type(&request.content_type)
            .acl(canned_acl(request.access))
            .storage_class(StorageClass::Standard)
            .send()
            .await
            .map_err(|e| store_error(request, e))?;

        let upload_id = created
            .upload_id()
            .ok_or_else(|| StorageError::Store {
                bucket: request.bucket.clone(),
                key: request.key.clone(),
                message: "CreateMultipartUpload returned no upload id".to_string(),
            })?
            .to_string();

        let result = self.upload_and_complete(request, &upload_id, body).await;
        if result.is_err() {
            // Abandoned uploads keep their parts until aborted.
            if let Err(e) = self
                .client
                .abort_multipart_upload()
                .bucket(&request.bucket)
                .key(&request.key)
                .upload_id(&upload_id)
                .send()
                .await
            {
                tracing::warn!(
                    bucket = %request.bucket,
                    key = %request.key,
                    upload_id = %upload_id,
                    error = %DisplayErrorContext(&e),
                    "failed to abort multipart upload"
                );
            }
        }
        result
    }

    async fn upload_and_complete(
        &self,
        request: &PutRequest,
        upload_id: &str,
        body: Bytes,
    ) -> Result<(), StorageError> {
        let ranges = part_ranges(body.len(), self.part_size);
        let mut parts = Vec::with_capacity(ranges.len());

        for (index, range) in ranges.into_iter().enumerate() {
            let part_number = i32::try_from(index + 1).map_err(|_| StorageError::Store {
                bucket: request.bucket.clone(),
                key: request.key.clone(),
                message: "too many parts".to_string(),
            })?;

            tracing::debug!(key = %request.key, part_number, len = range.len(), "uploading part");

            let uploaded = self
                .client
                .upload_part()
                .bucket(&request.bucket)
                .key(&request.key)
                .upload_id(upload_id)
                .part_number(part_number)
                .body(ByteStream::from(body.slice(range)))
                .send()
                .await
                .map_err(|e| store_error(request, e))?;

            parts.push(
                CompletedPart::builder()
                    .set_e_tag(uploaded.e_tag().map(str::to_string))
                    .part_number(part_number)
                    .build(),
            );
        }

        self.client
            .complete_multipart_upload()
            .bucket(&request.bucket)
            .key(&request.key)
            .upload_id(upload_id)
            .multipart_upload(
                CompletedMultipartUpload::builder()
                    .set_parts(Some(parts))
                    .build(),
            )
            .send()
            .await
            .map_err(|e| store_error(request, e))?;

        Ok(())
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<FetchedObject, StorageError> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    StorageError::NotFound {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    }
                } else {
                    StorageError::Fetch {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                        message: DisplayErrorContext(&e).to_string(),
                    }
                }
            })?;

        let content_type = output.content_type().map(str::to_string);
        let body = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Fetch {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: e.to_string(),
            })?;

        Ok(FetchedObject {
            bytes: body.into_bytes().to_vec(),
            content_type,
        })
    }

    async fn store(&self, mut request: PutRequest) -> Result<(), StorageError> {
        let body = Bytes::from(std::mem::take(&mut request.bytes));
        if body.len() <= self.part_size {
            self.put_single(&request, body).await
        } else {
            self.put_multipart(&request, body).await
        }
    }
}

/// Split `len` bytes into consecutive ranges of at most `part_size` bytes.
pub fn part_ranges(len: usize, part_size: usize) -> Vec<Range<usize>> {
    let part_size = part_size.max(1);
    (0..len)
        .step_by(part_size)
        .map(|start| start..(start + part_size).min(len))
        .collect()
}

fn canned_acl(access: AccessPolicy) -> ObjectCannedAcl {
    match access {
        AccessPolicy::Private => ObjectCannedAcl::Private,
        AccessPolicy::PublicRead => ObjectCannedAcl::PublicRead,
    }
}

fn store_error<E: std::error::Error>(request: &PutRequest, err: E) -> StorageError {
    StorageError::Store {
        bucket: request.bucket.clone(),
        key: request.key.clone(),
        message: DisplayErrorContext(err).to_string(),
    }
}
