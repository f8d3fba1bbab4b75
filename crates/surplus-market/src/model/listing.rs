use crate::model::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListingId(pub u32);

impl From<u32> for ListingId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ListingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "listing_{}", self.0)
    }
}

/// Fixed vocabulary of dietary tags a listing can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryTag {
    Vegetarian,
    Vegan,
    GlutenFree,
    Halal,
    Kosher,
    DairyFree,
    NutFree,
}

/// Lifecycle state of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Active,
    SoldOut,
    Expired,
}

/// Reference to an image held by the external media host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    /// Host-side identifier, needed for deletion.
    pub public_id: String,
}

/// The window during which reserved food can be collected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickupWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Maximum number of images a listing may carry.
pub const MAX_IMAGES_PER_LISTING: usize = 5;

/// A restaurant-posted batch of surplus food, available at a discount within
/// a pickup window.
///
/// Invariants maintained by the Listing actor:
/// - `discounted_price < original_price`
/// - `0 <= quantity_remaining <= quantity` (`quantity` is the immutable
///   initial stock)
/// - `discount_percentage` is recomputed on every price change
/// - `expires_at` always equals `pickup_window.end`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub restaurant_id: UserId,
    pub title: String,
    pub description: String,
    pub cuisine: String,
    pub dietary_tags: Vec<DietaryTag>,
    pub images: Vec<ImageRef>,
    pub original_price: u32,
    pub discounted_price: u32,
    pub discount_percentage: u32,
    pub quantity: u32,
    pub quantity_remaining: u32,
    pub pickup_window: PickupWindow,
    pub status: ListingStatus,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingCreate {
    pub restaurant_id: UserId,
    pub title: String,
    pub description: String,
    pub cuisine: String,
    pub dietary_tags: Vec<DietaryTag>,
    pub images: Vec<ImageRef>,
    pub original_price: u32,
    pub discounted_price: u32,
    pub quantity: u32,
    pub pickup_window: PickupWindow,
}

/// Patch payload for updating an active listing. Only the owning restaurant
/// may apply it.
///
/// Setting `quantity` restocks the listing: `quantity_remaining` is reset
/// to the new value without accounting for stock already reserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingUpdate {
    pub caller: UserId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub cuisine: Option<String>,
    pub dietary_tags: Option<Vec<DietaryTag>>,
    pub original_price: Option<u32>,
    pub discounted_price: Option<u32>,
    pub quantity: Option<u32>,
    pub pickup_window: Option<PickupWindow>,
    /// Appended to the existing images, subject to the per-listing cap.
    pub add_images: Vec<ImageRef>,
}

impl ListingUpdate {
    /// An empty patch from the given caller.
    pub fn by(caller: UserId) -> Self {
        Self {
            caller,
            title: None,
            description: None,
            cuisine: None,
            dietary_tags: None,
            original_price: None,
            discounted_price: None,
            quantity: None,
            pickup_window: None,
            add_images: Vec::new(),
        }
    }
}

/// Customer-facing browse query. Every populated field narrows the result;
/// only active, unexpired (as of `now`) listings are considered.
#[derive(Debug, Clone)]
pub struct BrowseQuery {
    pub cuisine: Option<String>,
    /// Match listings carrying *any* of these tags.
    pub dietary_tags: Vec<DietaryTag>,
    pub max_price: Option<u32>,
    /// Case-insensitive substring over title or description.
    pub search: Option<String>,
    pub now: DateTime<Utc>,
}

impl BrowseQuery {
    /// An unconstrained query evaluated at the given instant.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            cuisine: None,
            dietary_tags: Vec::new(),
            max_price: None,
            search: None,
            now,
        }
    }
}

/// Query predicates for the Listing actor.
#[derive(Debug, Clone)]
pub enum ListingFilter {
    Browse(BrowseQuery),
    ByOwner {
        restaurant_id: UserId,
        status: Option<ListingStatus>,
    },
}
