//! Domain actions processed by the Listing actor.
//!
//! Stock movements (reserve, release) run inside the actor so that
//! concurrent orders for the same listing are serialized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Listing, UserId};

/// Actions that can be performed on a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ListingAction {
    /// Atomically take `quantity` units of stock for a new order.
    Reserve {
        quantity: u32,
        now: DateTime<Utc>,
    },
    /// Return units of stock after an order is cancelled.
    Release { quantity: u32 },
    /// Manually mark the listing as sold out. Owner only.
    MarkSoldOut { caller: UserId },
    /// Re-evaluate expiry against the given instant before a read.
    Refresh { now: DateTime<Utc> },
    /// Detach one image and delete it from the media host. Owner only.
    RemoveImage { caller: UserId, public_id: String },
}

/// Snapshot handed back to the caller of a successful [`ListingAction::Reserve`].
///
/// Captures the pricing inputs at the moment of reservation so the order
/// can be priced without a second read of the listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub restaurant_id: UserId,
    pub unit_price: u32,
    pub quantity_remaining: u32,
}

/// Results of listing actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ListingActionResult {
    Reserved(Reservation),
    Released { quantity_remaining: u32 },
    SoldOut(Listing),
    Refreshed(Listing),
    ImageRemoved(Listing),
}
