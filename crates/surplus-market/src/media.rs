//! Seam to the external media host.
//!
//! Image upload, storage and resizing are handled by a third-party host;
//! this service only keeps [`ImageRef`]s and asks the host to delete them
//! when a listing or an individual image is removed. The trait keeps the
//! Listing actor testable without network access.

use crate::model::ImageRef;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Failure reported by the media host.
#[derive(Debug, thiserror::Error)]
#[error("media host error: {0}")]
pub struct MediaError(pub String);

/// Deletion interface to the media host.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Delete the stored asset behind `image`.
    async fn delete(&self, image: &ImageRef) -> Result<(), MediaError>;
}

/// Shared handle injected into the Listing actor's context.
pub type SharedMediaStore = Arc<dyn MediaStore>;

/// A media store that acknowledges every deletion without doing anything.
/// Stands in for the real host in the demo binary and in tests.
pub struct NullMediaStore;

#[async_trait]
impl MediaStore for NullMediaStore {
    async fn delete(&self, image: &ImageRef) -> Result<(), MediaError> {
        debug!(public_id = %image.public_id, "media delete (no-op)");
        Ok(())
    }
}
