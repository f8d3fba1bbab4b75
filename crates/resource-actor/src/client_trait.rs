//! # ActorClient Trait
//!
//! Common interface for resource-specific client wrappers. Implementors point
//! at their inner [`ResourceClient`] and say how framework errors map into
//! their domain error; `get`, `find` and `delete` come for free.

use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard operations.
///
/// # Example
///
/// ```rust,ignore
/// #[async_trait]
/// impl ActorClient<Listing> for ListingClient {
///     type Error = ListingError;
///
///     fn inner(&self) -> &ResourceClient<Listing> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> ListingError {
///         ListingError::from_framework(e)
///     }
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    ///
    /// This is the place to downcast
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError)
    /// back into the actor's own error enum so callers can match on the
    /// precise variant instead of a stringified message.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity matching the filter.
    #[tracing::instrument(skip(self, filter))]
    async fn find(&self, filter: T::Filter) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().find(filter).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
