//! Domain models and DTOs for the marketplace resources.
//!
//! Pure data: the lifecycle rules live in the per-resource actor modules,
//! where each type's `ActorEntity` implementation enforces them.

pub mod listing;
pub mod order;
pub mod user;

pub use listing::{
    BrowseQuery, DietaryTag, ImageRef, Listing, ListingCreate, ListingFilter, ListingId,
    ListingStatus, ListingUpdate, PickupWindow, MAX_IMAGES_PER_LISTING,
};
pub use order::{Order, OrderCreate, OrderFilter, OrderId, OrderStatus, PaymentMethod};
pub use user::{
    Address, DayHours, GeoPoint, OperatingHours, Role, User, UserCreate, UserFilter, UserId,
    UserUpdate,
};
