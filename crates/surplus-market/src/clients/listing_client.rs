//! Client wrapper for the Listing actor.

use crate::listing_actor::{ListingAction, ListingActionResult, ListingError, Reservation};
use crate::model::{
    BrowseQuery, Listing, ListingCreate, ListingFilter, ListingId, ListingStatus, ListingUpdate,
    UserId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::instrument;

/// Cap on the number of listings a single browse returns.
const BROWSE_LIMIT: usize = 50;

/// Typed handle to the Listing actor.
#[derive(Clone)]
pub struct ListingClient {
    inner: ResourceClient<Listing>,
}

#[async_trait]
impl ActorClient<Listing> for ListingClient {
    type Error = ListingError;

    fn inner(&self) -> &ResourceClient<Listing> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> ListingError {
        ListingError::from_framework(e)
    }
}

impl ListingClient {
    pub fn new(inner: ResourceClient<Listing>) -> Self {
        Self { inner }
    }

    fn unexpected(result: ListingActionResult) -> ListingError {
        ListingError::ActorCommunication(format!("unexpected action result: {result:?}"))
    }

    /// Creates a listing. The actor verifies the owner holds a restaurant
    /// account before the listing becomes visible.
    #[instrument(skip(self, params), fields(restaurant = %params.restaurant_id))]
    pub async fn create_listing(&self, params: ListingCreate) -> Result<Listing, ListingError> {
        let id = self
            .inner
            .create(params)
            .await
            .map_err(Self::map_error)?;
        self.get(id.clone())
            .await?
            .ok_or_else(|| ListingError::NotFound(id.to_string()))
    }

    /// Customer-facing search over active, unexpired listings. Newest first,
    /// capped at [`BROWSE_LIMIT`] results.
    pub async fn browse(&self, query: BrowseQuery) -> Result<Vec<Listing>, ListingError> {
        let mut listings = self.find(ListingFilter::Browse(query)).await?;
        listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        listings.truncate(BROWSE_LIMIT);
        Ok(listings)
    }

    /// A restaurant's own listings, newest first, optionally narrowed by
    /// status.
    pub async fn listings_for(
        &self,
        restaurant_id: UserId,
        status: Option<ListingStatus>,
    ) -> Result<Vec<Listing>, ListingError> {
        let mut listings = self
            .find(ListingFilter::ByOwner {
                restaurant_id,
                status,
            })
            .await?;
        listings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(listings)
    }

    /// Fetches one listing with its expiry re-evaluated as of `now`.
    pub async fn get_refreshed(
        &self,
        id: ListingId,
        now: DateTime<Utc>,
    ) -> Result<Listing, ListingError> {
        match self
            .inner
            .perform_action(id, ListingAction::Refresh { now })
            .await
            .map_err(Self::map_error)?
        {
            ListingActionResult::Refreshed(listing) => Ok(listing),
            other => Err(Self::unexpected(other)),
        }
    }

    /// Applies an owner's patch to an active listing.
    #[instrument(skip(self, update))]
    pub async fn update_listing(
        &self,
        id: ListingId,
        update: ListingUpdate,
    ) -> Result<Listing, ListingError> {
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Removes a listing and its hosted images. Owner only; the ownership
    /// check happens here because the generic delete carries no caller.
    #[instrument(skip(self))]
    pub async fn delete_listing(&self, id: ListingId, caller: UserId) -> Result<(), ListingError> {
        let listing = self
            .get(id.clone())
            .await?
            .ok_or_else(|| ListingError::NotFound(id.to_string()))?;
        if listing.restaurant_id != caller {
            return Err(ListingError::Authorization(
                "only the owning restaurant can remove a listing".into(),
            ));
        }
        self.delete(id).await
    }

    /// Manually marks a listing sold out.
    #[instrument(skip(self))]
    pub async fn mark_sold_out(
        &self,
        id: ListingId,
        caller: UserId,
    ) -> Result<Listing, ListingError> {
        match self
            .inner
            .perform_action(id, ListingAction::MarkSoldOut { caller })
            .await
            .map_err(Self::map_error)?
        {
            ListingActionResult::SoldOut(listing) => Ok(listing),
            other => Err(Self::unexpected(other)),
        }
    }

    /// Atomically takes stock for an order and returns the pricing snapshot.
    #[instrument(skip(self))]
    pub async fn reserve(
        &self,
        id: ListingId,
        quantity: u32,
        now: DateTime<Utc>,
    ) -> Result<Reservation, ListingError> {
        match self
            .inner
            .perform_action(id, ListingAction::Reserve { quantity, now })
            .await
            .map_err(Self::map_error)?
        {
            ListingActionResult::Reserved(reservation) => Ok(reservation),
            other => Err(Self::unexpected(other)),
        }
    }

    /// Returns previously reserved stock, reporting the new remaining count.
    #[instrument(skip(self))]
    pub async fn release(&self, id: ListingId, quantity: u32) -> Result<u32, ListingError> {
        match self
            .inner
            .perform_action(id, ListingAction::Release { quantity })
            .await
            .map_err(Self::map_error)?
        {
            ListingActionResult::Released { quantity_remaining } => Ok(quantity_remaining),
            other => Err(Self::unexpected(other)),
        }
    }

    /// Detaches one image from a listing and deletes it from the media host.
    #[instrument(skip(self))]
    pub async fn remove_image(
        &self,
        id: ListingId,
        caller: UserId,
        public_id: String,
    ) -> Result<Listing, ListingError> {
        match self
            .inner
            .perform_action(id, ListingAction::RemoveImage { caller, public_id })
            .await
            .map_err(Self::map_error)?
        {
            ListingActionResult::ImageRemoved(listing) => Ok(listing),
            other => Err(Self::unexpected(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_actor::mock::MockClient;

    #[tokio::test]
    async fn reserve_recovers_the_typed_stock_error() {
        let mut mock = MockClient::<Listing>::new();
        mock.expect_action(ListingId(1))
            .return_err(FrameworkError::EntityError(Box::new(
                ListingError::InsufficientStock {
                    requested: 5,
                    available: 2,
                },
            )));

        let client = ListingClient::new(mock.client());
        let err = client
            .reserve(ListingId(1), 5, Utc::now())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ListingError::InsufficientStock {
                requested: 5,
                available: 2
            }
        ));
        mock.verify();
    }
}
