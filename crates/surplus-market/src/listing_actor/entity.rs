//! `ActorEntity` implementation for [`Listing`].

use super::actions::{ListingAction, ListingActionResult, Reservation};
use super::error::ListingError;
use crate::clients::UserClient;
use crate::media::SharedMediaStore;
use crate::model::{
    Listing, ListingCreate, ListingFilter, ListingId, ListingStatus, ListingUpdate, Role,
    MAX_IMAGES_PER_LISTING,
};
use crate::pricing::discount_percentage;
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::{ActorClient, ActorEntity};
use tracing::warn;

/// Dependencies injected into the Listing actor: the user actor for owner
/// role checks and the media host for image deletion.
pub type ListingContext = (UserClient, SharedMediaStore);

#[async_trait]
impl ActorEntity for Listing {
    type Id = ListingId;
    type Create = ListingCreate;
    type Update = ListingUpdate;
    type Action = ListingAction;
    type ActionResult = ListingActionResult;
    type Filter = ListingFilter;
    type Context = ListingContext;
    type Error = ListingError;

    fn from_create_params(id: ListingId, params: ListingCreate) -> Result<Self, Self::Error> {
        let title = params.title.trim().to_string();
        if title.is_empty() {
            return Err(ListingError::Validation("title is required".into()));
        }
        if title.len() > 100 {
            return Err(ListingError::Validation(
                "title must be at most 100 characters".into(),
            ));
        }
        let description = params.description.trim().to_string();
        if description.is_empty() {
            return Err(ListingError::Validation("description is required".into()));
        }
        if description.len() > 500 {
            return Err(ListingError::Validation(
                "description must be at most 500 characters".into(),
            ));
        }
        if params.cuisine.trim().is_empty() {
            return Err(ListingError::Validation("cuisine is required".into()));
        }
        if params.original_price == 0 {
            return Err(ListingError::Validation(
                "original price must be greater than zero".into(),
            ));
        }
        if params.discounted_price >= params.original_price {
            return Err(ListingError::Validation(
                "discounted price must be below the original price".into(),
            ));
        }
        if params.quantity == 0 {
            return Err(ListingError::Validation(
                "quantity must be at least 1".into(),
            ));
        }
        let window = params.pickup_window;
        if window.start >= window.end {
            return Err(ListingError::Validation(
                "pickup window must end after it starts".into(),
            ));
        }
        if window.start < Utc::now() {
            return Err(ListingError::Validation(
                "pickup window must start in the future".into(),
            ));
        }
        if params.images.len() > MAX_IMAGES_PER_LISTING {
            return Err(ListingError::Validation(format!(
                "a listing may carry at most {MAX_IMAGES_PER_LISTING} images"
            )));
        }

        Ok(Self {
            id,
            restaurant_id: params.restaurant_id,
            title,
            description,
            cuisine: params.cuisine.trim().to_string(),
            dietary_tags: params.dietary_tags,
            images: params.images,
            original_price: params.original_price,
            discounted_price: params.discounted_price,
            discount_percentage: discount_percentage(
                params.original_price,
                params.discounted_price,
            ),
            quantity: params.quantity,
            quantity_remaining: params.quantity,
            pickup_window: window,
            status: ListingStatus::Active,
            expires_at: window.end,
            created_at: Utc::now(),
        })
    }

    fn matches(&self, filter: &ListingFilter) -> bool {
        match filter {
            ListingFilter::Browse(query) => {
                if self.status != ListingStatus::Active || self.expires_at <= query.now {
                    return false;
                }
                if let Some(cuisine) = &query.cuisine {
                    if !self.cuisine.eq_ignore_ascii_case(cuisine) {
                        return false;
                    }
                }
                if !query.dietary_tags.is_empty()
                    && !query
                        .dietary_tags
                        .iter()
                        .any(|tag| self.dietary_tags.contains(tag))
                {
                    return false;
                }
                if let Some(max) = query.max_price {
                    if self.discounted_price > max {
                        return false;
                    }
                }
                if let Some(term) = &query.search {
                    let term = term.to_lowercase();
                    if !self.title.to_lowercase().contains(&term)
                        && !self.description.to_lowercase().contains(&term)
                    {
                        return false;
                    }
                }
                true
            }
            ListingFilter::ByOwner {
                restaurant_id,
                status,
            } => {
                self.restaurant_id == *restaurant_id
                    && status.map_or(true, |s| self.status == s)
            }
        }
    }

    async fn on_create(&mut self, ctx: &ListingContext) -> Result<(), Self::Error> {
        let (users, _media) = ctx;
        let owner = users
            .get(self.restaurant_id.clone())
            .await
            .map_err(|e| ListingError::ActorCommunication(e.to_string()))?
            .ok_or_else(|| {
                ListingError::Authorization("owner account does not exist".into())
            })?;
        if owner.role != Role::Restaurant {
            return Err(ListingError::Authorization(
                "only restaurant accounts can create listings".into(),
            ));
        }
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: ListingUpdate,
        _ctx: &ListingContext,
    ) -> Result<(), Self::Error> {
        if update.caller != self.restaurant_id {
            return Err(ListingError::Authorization(
                "only the owning restaurant can edit a listing".into(),
            ));
        }
        if self.status != ListingStatus::Active {
            return Err(ListingError::InvalidState(
                "only active listings can be edited".into(),
            ));
        }

        // Validate the whole patch before touching any field, so a rejected
        // update leaves the stored listing exactly as it was.
        let original = update.original_price.unwrap_or(self.original_price);
        let discounted = update.discounted_price.unwrap_or(self.discounted_price);
        if original == 0 {
            return Err(ListingError::Validation(
                "original price must be greater than zero".into(),
            ));
        }
        if discounted >= original {
            return Err(ListingError::Validation(
                "discounted price must be below the original price".into(),
            ));
        }
        if let Some(window) = update.pickup_window {
            if window.start >= window.end {
                return Err(ListingError::Validation(
                    "pickup window must end after it starts".into(),
                ));
            }
        }
        if self.images.len() + update.add_images.len() > MAX_IMAGES_PER_LISTING {
            return Err(ListingError::Validation(format!(
                "a listing may carry at most {MAX_IMAGES_PER_LISTING} images"
            )));
        }
        let title = match update.title {
            Some(title) => {
                let title = title.trim().to_string();
                if title.is_empty() || title.len() > 100 {
                    return Err(ListingError::Validation(
                        "title must be 1 to 100 characters".into(),
                    ));
                }
                Some(title)
            }
            None => None,
        };
        let description = match update.description {
            Some(description) => {
                let description = description.trim().to_string();
                if description.is_empty() || description.len() > 500 {
                    return Err(ListingError::Validation(
                        "description must be 1 to 500 characters".into(),
                    ));
                }
                Some(description)
            }
            None => None,
        };
        if update.quantity == Some(0) {
            return Err(ListingError::Validation(
                "quantity must be at least 1".into(),
            ));
        }

        if let Some(window) = update.pickup_window {
            self.pickup_window = window;
            self.expires_at = window.end;
        }
        self.images.extend(update.add_images);
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(cuisine) = update.cuisine {
            self.cuisine = cuisine.trim().to_string();
        }
        if let Some(tags) = update.dietary_tags {
            self.dietary_tags = tags;
        }
        if let Some(quantity) = update.quantity {
            // restock: the new figure replaces both counters
            self.quantity = quantity;
            self.quantity_remaining = quantity;
        }
        self.original_price = original;
        self.discounted_price = discounted;
        self.discount_percentage = discount_percentage(original, discounted);
        Ok(())
    }

    async fn on_delete(&self, ctx: &ListingContext) -> Result<(), Self::Error> {
        let (_users, media) = ctx;
        // Best effort: a stranded asset on the host is preferable to a
        // listing that cannot be removed.
        for image in &self.images {
            if let Err(e) = media.delete(image).await {
                warn!(listing_id = %self.id, public_id = %image.public_id,
                      error = %e, "failed to delete listing image");
            }
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ListingAction,
        ctx: &ListingContext,
    ) -> Result<ListingActionResult, Self::Error> {
        match action {
            ListingAction::Reserve { quantity, now } => {
                if self.status == ListingStatus::Active && now > self.expires_at {
                    self.status = ListingStatus::Expired;
                }
                match self.status {
                    ListingStatus::Expired => return Err(ListingError::Expired),
                    ListingStatus::SoldOut => {
                        return Err(ListingError::InvalidState(
                            "this listing is sold out".into(),
                        ))
                    }
                    ListingStatus::Active => {}
                }
                if quantity == 0 {
                    return Err(ListingError::Validation(
                        "quantity must be at least 1".into(),
                    ));
                }
                if quantity > self.quantity_remaining {
                    return Err(ListingError::InsufficientStock {
                        requested: quantity,
                        available: self.quantity_remaining,
                    });
                }
                self.quantity_remaining -= quantity;
                if self.quantity_remaining == 0 {
                    self.status = ListingStatus::SoldOut;
                }
                Ok(ListingActionResult::Reserved(Reservation {
                    restaurant_id: self.restaurant_id.clone(),
                    unit_price: self.discounted_price,
                    quantity_remaining: self.quantity_remaining,
                }))
            }
            ListingAction::Release { quantity } => {
                self.quantity_remaining = (self.quantity_remaining + quantity).min(self.quantity);
                if self.status == ListingStatus::SoldOut && self.quantity_remaining > 0 {
                    self.status = ListingStatus::Active;
                }
                Ok(ListingActionResult::Released {
                    quantity_remaining: self.quantity_remaining,
                })
            }
            ListingAction::MarkSoldOut { caller } => {
                if caller != self.restaurant_id {
                    return Err(ListingError::Authorization(
                        "only the owning restaurant can mark a listing sold out".into(),
                    ));
                }
                if self.status != ListingStatus::Active {
                    return Err(ListingError::InvalidState(
                        "only active listings can be marked sold out".into(),
                    ));
                }
                self.quantity_remaining = 0;
                self.status = ListingStatus::SoldOut;
                Ok(ListingActionResult::SoldOut(self.clone()))
            }
            ListingAction::Refresh { now } => {
                if self.status == ListingStatus::Active && now > self.expires_at {
                    self.status = ListingStatus::Expired;
                }
                Ok(ListingActionResult::Refreshed(self.clone()))
            }
            ListingAction::RemoveImage { caller, public_id } => {
                if caller != self.restaurant_id {
                    return Err(ListingError::Authorization(
                        "only the owning restaurant can remove images".into(),
                    ));
                }
                let index = self
                    .images
                    .iter()
                    .position(|img| img.public_id == public_id)
                    .ok_or_else(|| ListingError::NotFound(format!("image {public_id}")))?;
                let (_users, media) = ctx;
                media
                    .delete(&self.images[index])
                    .await
                    .map_err(|e| ListingError::Media(e.to_string()))?;
                self.images.remove(index);
                Ok(ListingActionResult::ImageRemoved(self.clone()))
            }
        }
    }
}
