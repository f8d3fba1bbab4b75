//! Error types for the User actor.

use resource_actor::FrameworkError;
use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// The requested user was not found.
    #[error("user not found: {0}")]
    NotFound(String),

    /// Malformed or missing registration/profile data.
    #[error("{0}")]
    Validation(String),

    /// The caller's role does not permit the operation.
    #[error("{0}")]
    Authorization(String),

    /// An account with this email already exists.
    #[error("an account already exists for {0}")]
    DuplicateEmail(String),

    /// An error occurred while communicating with the actor system.
    #[error("actor communication error: {0}")]
    ActorCommunication(String),
}

impl UserError {
    /// Recovers the typed error from a framework failure where possible.
    pub fn from_framework(e: FrameworkError) -> Self {
        match e {
            FrameworkError::EntityError(inner) => match inner.downcast::<UserError>() {
                Ok(err) => *err,
                Err(other) => UserError::ActorCommunication(other.to_string()),
            },
            FrameworkError::NotFound(id) => UserError::NotFound(id),
            FrameworkError::Duplicate(email) => UserError::DuplicateEmail(email),
            other => UserError::ActorCommunication(other.to_string()),
        }
    }
}
