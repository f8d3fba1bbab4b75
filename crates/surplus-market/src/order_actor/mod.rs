//! # Order Actor
//!
//! Owns reservations against listings and drives them through the
//! `Reserved → Paid → PickedUp` lifecycle (with `Cancelled` as the escape
//! hatch before pickup).
//!
//! Creation is the delicate part: `on_create` verifies the customer's role
//! against the user actor, then asks the listing actor for an atomic stock
//! reservation and prices the order from the returned snapshot. A failure at
//! any point discards the order, and a duplicate pickup code is rejected
//! before the reservation is attempted, so no stock leaks.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::OrderContext;
pub use error::*;

use crate::model::Order;
use resource_actor::{ResourceActor, ResourceClient};

/// Creates a new Order actor and its generic client.
pub fn new() -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(32)
}
