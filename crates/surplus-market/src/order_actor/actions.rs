//! Domain actions processed by the Order actor.

use crate::model::{Order, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Actions that can be performed on an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OrderAction {
    /// Record that payment completed. No gateway is involved; the caller
    /// asserts it.
    MarkPaid { caller: UserId },
    /// Cancel the order and return its stock to the listing.
    Cancel { caller: UserId },
    /// Hand over the food: the restaurant presents the customer's code.
    VerifyPickup {
        caller: UserId,
        code: String,
        now: DateTime<Utc>,
    },
    /// Leave a one-time rating (and optional review) after pickup.
    AddReview {
        caller: UserId,
        rating: u8,
        review: Option<String>,
    },
}

/// Results of order actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OrderActionResult {
    Paid(Order),
    Cancelled(Order),
    PickedUp(Order),
    /// The reviewed order plus the restaurant's updated aggregate.
    Reviewed {
        order: Order,
        restaurant_rating: f64,
        total_ratings: u32,
    },
}
