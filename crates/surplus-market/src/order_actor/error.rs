//! Error types for the Order actor.

use crate::listing_actor::ListingError;
use resource_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("order not found: {0}")]
    NotFound(String),

    /// The referenced listing was not found.
    #[error("listing not found: {0}")]
    ListingNotFound(String),

    /// The referenced listing's pickup window has lapsed.
    #[error("this listing has expired")]
    ListingExpired,

    /// The requested quantity exceeds the listing's remaining stock.
    #[error("only {available} items remaining (requested {requested})")]
    InsufficientStock { requested: u32, available: u32 },

    /// Malformed or out-of-range input.
    #[error("{0}")]
    Validation(String),

    /// The caller is not a party to this order, or lacks the required role.
    #[error("{0}")]
    Authorization(String),

    /// The operation is not valid for the order's current status.
    #[error("{0}")]
    InvalidState(String),

    /// The presented pickup code does not match this order.
    #[error("invalid pickup code")]
    InvalidCode,

    /// Code generation kept colliding with live orders.
    #[error("could not allocate a unique pickup code")]
    DuplicateCode,

    /// An error occurred while communicating with the actor system.
    #[error("actor communication error: {0}")]
    ActorCommunication(String),
}

impl From<ListingError> for OrderError {
    fn from(e: ListingError) -> Self {
        match e {
            ListingError::NotFound(id) => OrderError::ListingNotFound(id),
            ListingError::Expired => OrderError::ListingExpired,
            ListingError::InsufficientStock {
                requested,
                available,
            } => OrderError::InsufficientStock {
                requested,
                available,
            },
            ListingError::InvalidState(msg) => OrderError::InvalidState(msg),
            ListingError::Validation(msg) => OrderError::Validation(msg),
            other => OrderError::ActorCommunication(other.to_string()),
        }
    }
}

impl OrderError {
    /// Recovers the typed error from a framework failure where possible.
    pub fn from_framework(e: FrameworkError) -> Self {
        match e {
            FrameworkError::EntityError(inner) => match inner.downcast::<OrderError>() {
                Ok(err) => *err,
                Err(other) => OrderError::ActorCommunication(other.to_string()),
            },
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::Duplicate(_) => OrderError::DuplicateCode,
            other => OrderError::ActorCommunication(other.to_string()),
        }
    }
}
