//! Client wrapper for the Order actor.

use crate::model::{
    ListingId, Order, OrderCreate, OrderFilter, OrderId, OrderStatus, PaymentMethod, UserId,
};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use crate::pricing::generate_pickup_code;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// How many fresh pickup codes to try before giving up on a colliding
/// create. Collisions among 900k codes are rare; repeated ones mean
/// something is wrong.
const PICKUP_CODE_ATTEMPTS: usize = 5;

/// What a customer submits to place an order. The pickup code is not part
/// of it; this client generates one.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub customer_id: UserId,
    pub listing_id: ListingId,
    pub quantity: u32,
    pub payment_method: PaymentMethod,
}

/// Typed handle to the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> OrderError {
        OrderError::from_framework(e)
    }
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    fn unexpected(result: OrderActionResult) -> OrderError {
        OrderError::ActorCommunication(format!("unexpected action result: {result:?}"))
    }

    /// Places an order: generates a pickup code, reserves stock, prices the
    /// order. A code collision costs nothing (the actor rejects it before
    /// reserving), so we simply retry with a fresh code.
    #[instrument(skip(self, request), fields(customer = %request.customer_id, listing = %request.listing_id))]
    pub async fn create_order(&self, request: OrderRequest) -> Result<Order, OrderError> {
        for attempt in 1..=PICKUP_CODE_ATTEMPTS {
            let params = OrderCreate {
                customer_id: request.customer_id.clone(),
                listing_id: request.listing_id.clone(),
                quantity: request.quantity,
                payment_method: request.payment_method,
                pickup_code: generate_pickup_code(),
            };
            match self.inner.create(params).await {
                Ok(id) => {
                    return self
                        .get(id.clone())
                        .await?
                        .ok_or_else(|| OrderError::NotFound(id.to_string()))
                }
                Err(FrameworkError::Duplicate(_)) => {
                    debug!(attempt, "pickup code collision, regenerating");
                }
                Err(e) => return Err(Self::map_error(e)),
            }
        }
        Err(OrderError::DuplicateCode)
    }

    /// A customer's orders, newest first, optionally narrowed by status.
    pub async fn my_orders(
        &self,
        customer_id: UserId,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, OrderError> {
        let mut orders = self
            .find(OrderFilter::ByCustomer {
                customer_id,
                status,
            })
            .await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Orders placed against a restaurant, newest first.
    pub async fn restaurant_orders(
        &self,
        restaurant_id: UserId,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, OrderError> {
        let mut orders = self
            .find(OrderFilter::ByRestaurant {
                restaurant_id,
                status,
            })
            .await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// Fetches one order, visible only to its customer or its restaurant.
    pub async fn get_for(&self, id: OrderId, caller: UserId) -> Result<Order, OrderError> {
        let order = self
            .get(id.clone())
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;
        if order.customer_id != caller && order.restaurant_id != caller {
            return Err(OrderError::Authorization(
                "only a party to the order can view it".into(),
            ));
        }
        Ok(order)
    }

    /// Records that the order was paid.
    #[instrument(skip(self))]
    pub async fn mark_paid(&self, id: OrderId, caller: UserId) -> Result<Order, OrderError> {
        match self
            .inner
            .perform_action(id, OrderAction::MarkPaid { caller })
            .await
            .map_err(Self::map_error)?
        {
            OrderActionResult::Paid(order) => Ok(order),
            other => Err(Self::unexpected(other)),
        }
    }

    /// Cancels the order and returns its stock to the listing.
    #[instrument(skip(self))]
    pub async fn cancel(&self, id: OrderId, caller: UserId) -> Result<Order, OrderError> {
        match self
            .inner
            .perform_action(id, OrderAction::Cancel { caller })
            .await
            .map_err(Self::map_error)?
        {
            OrderActionResult::Cancelled(order) => Ok(order),
            other => Err(Self::unexpected(other)),
        }
    }

    /// Completes handover against the customer's pickup code.
    #[instrument(skip(self, code))]
    pub async fn verify_pickup(
        &self,
        id: OrderId,
        caller: UserId,
        code: String,
        now: DateTime<Utc>,
    ) -> Result<Order, OrderError> {
        match self
            .inner
            .perform_action(id, OrderAction::VerifyPickup { caller, code, now })
            .await
            .map_err(Self::map_error)?
        {
            OrderActionResult::PickedUp(order) => Ok(order),
            other => Err(Self::unexpected(other)),
        }
    }

    /// Leaves the order's one-time rating and review, returning the order
    /// plus the restaurant's updated aggregate.
    #[instrument(skip(self, review))]
    pub async fn add_review(
        &self,
        id: OrderId,
        caller: UserId,
        rating: u8,
        review: Option<String>,
    ) -> Result<(Order, f64, u32), OrderError> {
        match self
            .inner
            .perform_action(
                id,
                OrderAction::AddReview {
                    caller,
                    rating,
                    review,
                },
            )
            .await
            .map_err(Self::map_error)?
        {
            OrderActionResult::Reviewed {
                order,
                restaurant_rating,
                total_ratings,
            } => Ok((order, restaurant_rating, total_ratings)),
            other => Err(Self::unexpected(other)),
        }
    }
}
