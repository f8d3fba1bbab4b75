//! Error types for the Listing actor.

use resource_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during listing operations.
#[derive(Debug, Error)]
pub enum ListingError {
    /// The requested listing (or image) was not found.
    #[error("listing not found: {0}")]
    NotFound(String),

    /// Malformed or out-of-range input: price ordering, time ordering,
    /// missing required field, too many images.
    #[error("{0}")]
    Validation(String),

    /// The caller does not own the listing, or lacks the restaurant role.
    #[error("{0}")]
    Authorization(String),

    /// The operation is not valid for the listing's current status.
    #[error("{0}")]
    InvalidState(String),

    /// The requested quantity exceeds the remaining stock.
    #[error("only {available} items remaining (requested {requested})")]
    InsufficientStock { requested: u32, available: u32 },

    /// The listing's pickup window has lapsed.
    #[error("this listing has expired")]
    Expired,

    /// The external media host reported a failure.
    #[error("{0}")]
    Media(String),

    /// An error occurred while communicating with the actor system.
    #[error("actor communication error: {0}")]
    ActorCommunication(String),
}

impl ListingError {
    /// Recovers the typed error from a framework failure where possible.
    pub fn from_framework(e: FrameworkError) -> Self {
        match e {
            FrameworkError::EntityError(inner) => match inner.downcast::<ListingError>() {
                Ok(err) => *err,
                Err(other) => ListingError::ActorCommunication(other.to_string()),
            },
            FrameworkError::NotFound(id) => ListingError::NotFound(id),
            other => ListingError::ActorCommunication(other.to_string()),
        }
    }
}
