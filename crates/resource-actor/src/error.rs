//! # Framework Errors
//!
//! Transport- and store-level failures shared by every actor and client.
//! Domain failures travel inside [`FrameworkError::EntityError`] and can be
//! recovered by downcasting on the client side.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Duplicate key: {0}")]
    Duplicate(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}
