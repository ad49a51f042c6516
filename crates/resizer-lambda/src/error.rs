use resizer_core::TransformError;
use thiserror::Error;

use crate::storage::StorageError;

/// Failure of one event invocation.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("transform task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
