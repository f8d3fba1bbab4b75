//! # Resource Clients
//!
//! Thin wrappers around the generic actor clients that expose the domain's
//! API: named operations, typed errors, and the cross-cutting policies that
//! do not belong inside an actor (result ordering and caps, pickup-code
//! regeneration, pre-delete ownership checks).
//!
//! All wrappers are cheap to clone; they hold only channel senders.

pub mod listing_client;
pub mod order_client;
pub mod user_client;

pub use listing_client::ListingClient;
pub use order_client::{OrderClient, OrderRequest};
pub use user_client::UserClient;
