//! # User Actor
//!
//! Manages accounts: registration with email uniqueness, profile updates,
//! lookup by email for the delegated auth layer, and the restaurant rating
//! aggregate.
//!
//! The rating aggregate is the one piece of genuinely shared mutable state
//! on users. It is updated only through [`UserAction::RecordRating`], so the
//! read-modify-write happens inside the actor and concurrent reviews
//! serialize instead of losing updates.
//!
//! [`UserAction::RecordRating`]: actions::UserAction::RecordRating

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::User;
use resource_actor::{ResourceActor, ResourceClient};

/// Creates a new User actor and its generic client.
pub fn new() -> (ResourceActor<User>, ResourceClient<User>) {
    ResourceActor::new(32)
}
