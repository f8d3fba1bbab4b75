//! Client wrapper for the User actor.

use crate::model::{User, UserCreate, UserFilter, UserId, UserUpdate};
use crate::user_actor::{UserAction, UserActionResult, UserError};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::instrument;

/// Typed handle to the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> UserError {
        UserError::from_framework(e)
    }
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }

    /// Registers an account. Email uniqueness is enforced by the actor's
    /// unique-key index.
    #[instrument(skip(self, params), fields(email = %params.email))]
    pub async fn register(&self, params: UserCreate) -> Result<User, UserError> {
        let id = self
            .inner
            .create(params)
            .await
            .map_err(Self::map_error)?;
        self.get(id.clone())
            .await?
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    /// Looks up an account by email, normalized the way registration
    /// normalizes it.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let email = email.trim().to_lowercase();
        let mut found = self.find(UserFilter::ByEmail(email)).await?;
        Ok(found.pop())
    }

    /// Applies a profile patch and returns the updated account.
    #[instrument(skip(self, update))]
    pub async fn update_profile(
        &self,
        id: UserId,
        update: UserUpdate,
    ) -> Result<User, UserError> {
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Folds a new 1-5 rating into the restaurant's aggregate, returning the
    /// updated `(mean, count)`.
    #[instrument(skip(self))]
    pub async fn record_rating(&self, id: UserId, rating: u8) -> Result<(f64, u32), UserError> {
        match self
            .inner
            .perform_action(id, UserAction::RecordRating { rating })
            .await
            .map_err(Self::map_error)?
        {
            UserActionResult::RatingRecorded {
                rating,
                total_ratings,
            } => Ok((rating, total_ratings)),
        }
    }
}
