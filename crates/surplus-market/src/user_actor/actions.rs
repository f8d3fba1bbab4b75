//! Custom actions for the User actor.

use serde::{Deserialize, Serialize};

/// Domain-specific operations on a user beyond CRUD.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum UserAction {
    /// Folds one new rating into the restaurant's rolling aggregate.
    ///
    /// The mean recomputation happens inside the actor, so concurrent
    /// reviews can never clobber each other's read-modify-write.
    RecordRating { rating: u8 },
}

/// Results from UserActions, matching 1:1 with [`UserAction`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum UserActionResult {
    /// The updated aggregate after recording a rating.
    RatingRecorded { rating: f64, total_ratings: u32 },
}
