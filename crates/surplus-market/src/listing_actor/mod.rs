//! # Listing Actor
//!
//! Owns the surplus-food catalog and, critically, its stock counts. Every
//! stock movement is an action processed by the single actor task, so two
//! orders racing for the last unit resolve deterministically: one gets a
//! reservation, the other gets an insufficient-stock error.
//!
//! Expiry is lazy. Nothing runs on a timer; reads and reservations carry a
//! `now` timestamp and flip an overdue listing to `Expired` on contact.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::ListingContext;
pub use error::*;

use crate::model::Listing;
use resource_actor::{ResourceActor, ResourceClient};

/// Creates a new Listing actor and its generic client.
pub fn new() -> (ResourceActor<Listing>, ResourceClient<Listing>) {
    ResourceActor::new(32)
}
