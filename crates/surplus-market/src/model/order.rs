use crate::model::{ListingId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Order lifecycle state.
///
/// Transitions: `Reserved → Paid → PickedUp`, with `Cancelled` reachable
/// from `Reserved` or `Paid`. `PickedUp` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Reserved,
    Paid,
    PickedUp,
    Cancelled,
}

/// How the customer intends to pay. Recorded only; gateway integration is
/// out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Mpesa,
    Card,
    Cash,
}

/// A customer's reservation against a listing.
///
/// The referenced customer, restaurant and listing are immutable after
/// creation. Prices are whole currency units; `total_price` is the listing's
/// discounted price times `quantity`, `platform_fee` is 15% of that rounded
/// to the nearest unit, and `restaurant_earnings` is the remainder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: UserId,
    pub restaurant_id: UserId,
    pub listing_id: ListingId,
    pub quantity: u32,
    pub total_price: u32,
    pub platform_fee: u32,
    pub restaurant_earnings: u32,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    /// 6-digit numeric string, unique among live orders. Presented by the
    /// customer at handover.
    pub pickup_code: String,
    /// Set at most once, and only after pickup.
    pub rating: Option<u8>,
    pub review: Option<String>,
    pub picked_up_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating an order. The pickup code is generated by the
/// client wrapper, which retries with a fresh code if the store reports a
/// collision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_id: UserId,
    pub listing_id: ListingId,
    pub quantity: u32,
    pub payment_method: PaymentMethod,
    pub pickup_code: String,
}

/// Query predicates for the Order actor.
#[derive(Debug, Clone)]
pub enum OrderFilter {
    ByCustomer {
        customer_id: UserId,
        status: Option<OrderStatus>,
    },
    ByRestaurant {
        restaurant_id: UserId,
        status: Option<OrderStatus>,
    },
}
