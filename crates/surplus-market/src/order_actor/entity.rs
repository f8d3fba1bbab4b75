//! `ActorEntity` implementation for [`Order`].

use super::actions::{OrderAction, OrderActionResult};
use super::error::OrderError;
use crate::clients::{ListingClient, UserClient};
use crate::listing_actor::ListingError;
use crate::model::{Order, OrderCreate, OrderFilter, OrderId, OrderStatus, Role, UserId};
use crate::pricing::{fee_split, is_valid_pickup_code};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::{ActorClient, ActorEntity};
use tracing::warn;

/// Dependencies injected into the Order actor: the user actor for role
/// checks and rating relay, and the listing actor for stock movements.
pub type OrderContext = (UserClient, ListingClient);

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Filter = OrderFilter;
    type Context = OrderContext;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.quantity == 0 {
            return Err(OrderError::Validation(
                "quantity must be at least 1".into(),
            ));
        }
        if !is_valid_pickup_code(&params.pickup_code) {
            return Err(OrderError::Validation(
                "pickup code must be a 6-digit number".into(),
            ));
        }

        // Pricing fields are filled in by `on_create` from the reservation
        // snapshot; until then the order is not visible to anyone.
        Ok(Self {
            id,
            customer_id: params.customer_id,
            restaurant_id: UserId(0),
            listing_id: params.listing_id,
            quantity: params.quantity,
            total_price: 0,
            platform_fee: 0,
            restaurant_earnings: 0,
            payment_method: params.payment_method,
            status: OrderStatus::Reserved,
            pickup_code: params.pickup_code,
            rating: None,
            review: None,
            picked_up_at: None,
            created_at: Utc::now(),
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.pickup_code.clone())
    }

    fn matches(&self, filter: &OrderFilter) -> bool {
        match filter {
            OrderFilter::ByCustomer {
                customer_id,
                status,
            } => self.customer_id == *customer_id && status.map_or(true, |s| self.status == s),
            OrderFilter::ByRestaurant {
                restaurant_id,
                status,
            } => self.restaurant_id == *restaurant_id && status.map_or(true, |s| self.status == s),
        }
    }

    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), Self::Error> {
        let (users, listings) = ctx;

        let customer = users
            .get(self.customer_id.clone())
            .await
            .map_err(|e| OrderError::ActorCommunication(e.to_string()))?
            .ok_or_else(|| {
                OrderError::Authorization("customer account does not exist".into())
            })?;
        if customer.role != Role::Customer {
            return Err(OrderError::Authorization(
                "only customer accounts can place orders".into(),
            ));
        }

        // One round trip takes the stock and prices the order. The listing
        // actor serializes reservations, so the snapshot cannot be stale.
        let reservation = listings
            .reserve(self.listing_id.clone(), self.quantity, Utc::now())
            .await?;

        self.restaurant_id = reservation.restaurant_id;
        self.total_price = match reservation.unit_price.checked_mul(self.quantity) {
            Some(total) => total,
            None => {
                // the reservation already took stock; give it back
                let _ = listings.release(self.listing_id.clone(), self.quantity).await;
                return Err(OrderError::Validation("order total is too large".into()));
            }
        };
        let (fee, earnings) = fee_split(self.total_price);
        self.platform_fee = fee;
        self.restaurant_earnings = earnings;
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &OrderContext) -> Result<(), Self::Error> {
        Err(OrderError::Validation(
            "orders cannot be edited; use cancel, pay or pickup".into(),
        ))
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &OrderContext,
    ) -> Result<OrderActionResult, Self::Error> {
        match action {
            OrderAction::MarkPaid { caller } => {
                if caller != self.customer_id {
                    return Err(OrderError::Authorization(
                        "only the ordering customer can mark payment".into(),
                    ));
                }
                if self.status != OrderStatus::Reserved {
                    return Err(OrderError::InvalidState(
                        "only reserved orders can be marked paid".into(),
                    ));
                }
                self.status = OrderStatus::Paid;
                Ok(OrderActionResult::Paid(self.clone()))
            }
            OrderAction::Cancel { caller } => {
                if caller != self.customer_id {
                    return Err(OrderError::Authorization(
                        "only the ordering customer can cancel".into(),
                    ));
                }
                match self.status {
                    OrderStatus::Reserved | OrderStatus::Paid => {}
                    OrderStatus::PickedUp => {
                        return Err(OrderError::InvalidState(
                            "picked-up orders cannot be cancelled".into(),
                        ))
                    }
                    OrderStatus::Cancelled => {
                        return Err(OrderError::InvalidState(
                            "this order is already cancelled".into(),
                        ))
                    }
                }

                let (_users, listings) = ctx;
                match listings.release(self.listing_id.clone(), self.quantity).await {
                    Ok(_) => {}
                    // The listing may have been deleted since; the
                    // cancellation still stands.
                    Err(ListingError::NotFound(id)) => {
                        warn!(order_id = %self.id, listing = %id,
                              "cancelled order references a deleted listing");
                    }
                    Err(e) => return Err(e.into()),
                }
                self.status = OrderStatus::Cancelled;
                Ok(OrderActionResult::Cancelled(self.clone()))
            }
            OrderAction::VerifyPickup { caller, code, now } => {
                if caller != self.restaurant_id {
                    return Err(OrderError::Authorization(
                        "only the restaurant can verify pickup".into(),
                    ));
                }
                if code != self.pickup_code {
                    return Err(OrderError::InvalidCode);
                }
                match self.status {
                    OrderStatus::Reserved | OrderStatus::Paid => {}
                    OrderStatus::PickedUp => {
                        return Err(OrderError::InvalidState(
                            "this order was already picked up".into(),
                        ))
                    }
                    OrderStatus::Cancelled => {
                        return Err(OrderError::InvalidState(
                            "cancelled orders cannot be picked up".into(),
                        ))
                    }
                }
                self.status = OrderStatus::PickedUp;
                self.picked_up_at = Some(now);
                Ok(OrderActionResult::PickedUp(self.clone()))
            }
            OrderAction::AddReview {
                caller,
                rating,
                review,
            } => {
                if caller != self.customer_id {
                    return Err(OrderError::Authorization(
                        "only the ordering customer can leave a review".into(),
                    ));
                }
                if self.status != OrderStatus::PickedUp {
                    return Err(OrderError::InvalidState(
                        "only picked-up orders can be reviewed".into(),
                    ));
                }
                if self.rating.is_some() {
                    return Err(OrderError::InvalidState(
                        "this order has already been reviewed".into(),
                    ));
                }
                if !(1..=5).contains(&rating) {
                    return Err(OrderError::Validation(
                        "rating must be between 1 and 5".into(),
                    ));
                }

                let (users, _listings) = ctx;
                let (restaurant_rating, total_ratings) = users
                    .record_rating(self.restaurant_id.clone(), rating)
                    .await
                    .map_err(|e| OrderError::ActorCommunication(e.to_string()))?;

                self.rating = Some(rating);
                self.review = review;
                Ok(OrderActionResult::Reviewed {
                    order: self.clone(),
                    restaurant_rating,
                    total_ratings,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing_actor::ListingActionResult;
    use crate::model::{Listing, ListingId, PaymentMethod, User};
    use crate::user_actor::UserActionResult;
    use chrono::Utc;
    use resource_actor::mock::MockClient;

    fn test_ctx() -> (MockClient<User>, MockClient<Listing>, OrderContext) {
        let users = MockClient::new();
        let listings = MockClient::new();
        let ctx = (
            UserClient::new(users.client()),
            ListingClient::new(listings.client()),
        );
        (users, listings, ctx)
    }

    fn sample_order() -> Order {
        Order {
            id: OrderId(1),
            customer_id: UserId(2),
            restaurant_id: UserId(1),
            listing_id: ListingId(1),
            quantity: 3,
            total_price: 900,
            platform_fee: 135,
            restaurant_earnings: 765,
            payment_method: PaymentMethod::Mpesa,
            status: OrderStatus::Reserved,
            pickup_code: "483920".into(),
            rating: None,
            review: None,
            picked_up_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn create_rejects_malformed_input() {
        let params = OrderCreate {
            customer_id: UserId(2),
            listing_id: ListingId(1),
            quantity: 0,
            payment_method: PaymentMethod::Cash,
            pickup_code: "483920".into(),
        };
        assert!(matches!(
            Order::from_create_params(OrderId(1), params),
            Err(OrderError::Validation(_))
        ));

        let params = OrderCreate {
            customer_id: UserId(2),
            listing_id: ListingId(1),
            quantity: 1,
            payment_method: PaymentMethod::Cash,
            pickup_code: "12ab".into(),
        };
        assert!(matches!(
            Order::from_create_params(OrderId(1), params),
            Err(OrderError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn overflowing_order_total_is_rejected_and_stock_released() {
        let (mut users, mut listings, ctx) = test_ctx();
        users.expect_get(UserId(2)).return_ok(Some(User {
            id: UserId(2),
            role: crate::model::Role::Customer,
            email: "customer@example.com".into(),
            password_hash: "hash".into(),
            name: "Test Customer".into(),
            phone: "+254700000000".into(),
            business_name: None,
            address: None,
            operating_hours: None,
            dietary_preferences: Vec::new(),
            rating: 0.0,
            total_ratings: 0,
            created_at: Utc::now(),
        }));
        listings
            .expect_action(ListingId(1))
            .return_ok(ListingActionResult::Reserved(
                crate::listing_actor::Reservation {
                    restaurant_id: UserId(1),
                    unit_price: u32::MAX,
                    quantity_remaining: 1,
                },
            ));
        listings
            .expect_action(ListingId(1))
            .return_ok(ListingActionResult::Released {
                quantity_remaining: 3,
            });

        let mut order = Order::from_create_params(
            OrderId(1),
            OrderCreate {
                customer_id: UserId(2),
                listing_id: ListingId(1),
                quantity: 3,
                payment_method: PaymentMethod::Card,
                pickup_code: "483920".into(),
            },
        )
        .unwrap();
        let err = order.on_create(&ctx).await.unwrap_err();
        assert!(matches!(err, OrderError::Validation(_)));

        users.verify();
        listings.verify();
    }

    #[tokio::test]
    async fn verify_pickup_checks_party_then_code_then_state() {
        let (_users, _listings, ctx) = test_ctx();
        let mut order = sample_order();
        let now = Utc::now();

        let err = order
            .handle_action(
                OrderAction::VerifyPickup {
                    caller: UserId(2),
                    code: "483920".into(),
                    now,
                },
                &ctx,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::Authorization(_)));

        let err = order
            .handle_action(
                OrderAction::VerifyPickup {
                    caller: UserId(1),
                    code: "000000".into(),
                    now,
                },
                &ctx,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidCode));

        let result = order
            .handle_action(
                OrderAction::VerifyPickup {
                    caller: UserId(1),
                    code: "483920".into(),
                    now,
                },
                &ctx,
            )
            .await
            .unwrap();
        match result {
            OrderActionResult::PickedUp(o) => {
                assert_eq!(o.status, OrderStatus::PickedUp);
                assert_eq!(o.picked_up_at, Some(now));
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let err = order
            .handle_action(
                OrderAction::VerifyPickup {
                    caller: UserId(1),
                    code: "483920".into(),
                    now,
                },
                &ctx,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidState(_)));
    }

    #[tokio::test]
    async fn cancel_releases_stock_once() {
        let (_users, mut listings, ctx) = test_ctx();
        listings
            .expect_action(ListingId(1))
            .return_ok(ListingActionResult::Released {
                quantity_remaining: 10,
            });

        let mut order = sample_order();
        let result = order
            .handle_action(OrderAction::Cancel { caller: UserId(2) }, &ctx)
            .await
            .unwrap();
        assert!(matches!(result, OrderActionResult::Cancelled(_)));
        assert_eq!(order.status, OrderStatus::Cancelled);

        // a second cancel must fail without touching the listing again
        let err = order
            .handle_action(OrderAction::Cancel { caller: UserId(2) }, &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidState(_)));
        listings.verify();
    }

    #[tokio::test]
    async fn cancel_is_customer_only() {
        let (_users, _listings, ctx) = test_ctx();
        let mut order = sample_order();
        let err = order
            .handle_action(OrderAction::Cancel { caller: UserId(7) }, &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::Authorization(_)));
        assert_eq!(order.status, OrderStatus::Reserved);
    }

    #[tokio::test]
    async fn mark_paid_moves_reserved_to_paid() {
        let (_users, _listings, ctx) = test_ctx();
        let mut order = sample_order();
        order
            .handle_action(OrderAction::MarkPaid { caller: UserId(2) }, &ctx)
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Paid);

        let err = order
            .handle_action(OrderAction::MarkPaid { caller: UserId(2) }, &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidState(_)));
    }

    #[tokio::test]
    async fn review_is_single_shot_and_relays_the_rating() {
        let (mut users, _listings, ctx) = test_ctx();
        users
            .expect_action(UserId(1))
            .return_ok(UserActionResult::RatingRecorded {
                rating: 5.0,
                total_ratings: 1,
            });

        let mut order = sample_order();
        order.status = OrderStatus::PickedUp;

        let result = order
            .handle_action(
                OrderAction::AddReview {
                    caller: UserId(2),
                    rating: 5,
                    review: Some("great value".into()),
                },
                &ctx,
            )
            .await
            .unwrap();
        match result {
            OrderActionResult::Reviewed {
                restaurant_rating,
                total_ratings,
                ..
            } => {
                assert_eq!(restaurant_rating, 5.0);
                assert_eq!(total_ratings, 1);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(order.rating, Some(5));

        let err = order
            .handle_action(
                OrderAction::AddReview {
                    caller: UserId(2),
                    rating: 4,
                    review: None,
                },
                &ctx,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidState(_)));
        users.verify();
    }

    #[tokio::test]
    async fn review_requires_pickup_first() {
        let (_users, _listings, ctx) = test_ctx();
        let mut order = sample_order();
        let err = order
            .handle_action(
                OrderAction::AddReview {
                    caller: UserId(2),
                    rating: 4,
                    review: None,
                },
                &ctx,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidState(_)));
    }
}
