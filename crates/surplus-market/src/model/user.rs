use crate::model::DietaryTag;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub u32);

impl From<u32> for UserId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user_{}", self.0)
    }
}

/// Account role, fixed at registration.
///
/// Capability checks match on this enum exhaustively; the update DTO has no
/// role field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    Restaurant,
    Admin,
}

/// Geographic point for restaurant addresses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Postal address with optional coordinates for map display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub coordinates: Option<GeoPoint>,
}

/// Opening and closing time for one day, as "HH:MM" strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayHours {
    pub open: String,
    pub close: String,
}

/// Weekly operating hours; `None` means closed that day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperatingHours {
    pub monday: Option<DayHours>,
    pub tuesday: Option<DayHours>,
    pub wednesday: Option<DayHours>,
    pub thursday: Option<DayHours>,
    pub friday: Option<DayHours>,
    pub saturday: Option<DayHours>,
    pub sunday: Option<DayHours>,
}

/// A registered account: customer, restaurant, or admin.
///
/// Restaurants additionally carry a business profile and a rolling rating
/// aggregate. The aggregate is only ever touched through the User actor's
/// `RecordRating` action, which keeps `rating` the exact arithmetic mean of
/// every rating received and `total_ratings` monotonically non-decreasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub role: Role,
    /// Lowercased, trimmed; unique across live accounts.
    pub email: String,
    /// Opaque hash. Hashing and verification belong to the auth boundary;
    /// this service only stores and returns the value.
    pub password_hash: String,
    pub name: String,
    pub phone: String,
    /// Required when `role` is `Restaurant`.
    pub business_name: Option<String>,
    pub address: Option<Address>,
    pub operating_hours: Option<OperatingHours>,
    pub dietary_preferences: Vec<DietaryTag>,
    pub rating: f64,
    pub total_ratings: u32,
    pub created_at: DateTime<Utc>,
}

/// Payload for registering a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub role: Role,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub phone: String,
    pub business_name: Option<String>,
    pub address: Option<Address>,
}

/// Profile update payload. Role and email are immutable and have no fields
/// here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
    pub operating_hours: Option<OperatingHours>,
    pub dietary_preferences: Option<Vec<DietaryTag>>,
}

/// Query predicates for the User actor.
#[derive(Debug, Clone)]
pub enum UserFilter {
    /// Exact match on the (lowercased) email. Backs the delegated login's
    /// account lookup and duplicate-registration checks.
    ByEmail(String),
}
