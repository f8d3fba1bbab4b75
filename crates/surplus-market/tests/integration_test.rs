use chrono::{Duration, Utc};
use surplus_market::clients::OrderRequest;
use surplus_market::lifecycle::Marketplace;
use surplus_market::listing_actor::ListingError;
use surplus_market::model::{
    BrowseQuery, DietaryTag, ListingCreate, ListingStatus, OrderStatus, PaymentMethod,
    PickupWindow, Role, User, UserCreate, UserId,
};
use surplus_market::order_actor::OrderError;
use surplus_market::user_actor::UserError;

async fn register(market: &Marketplace, role: Role, email: &str) -> User {
    market
        .users
        .register(UserCreate {
            role,
            email: email.into(),
            password_hash: "$argon2id$test".into(),
            name: "Test Account".into(),
            phone: "+254700000000".into(),
            business_name: (role == Role::Restaurant).then(|| "Test Kitchen".into()),
            address: None,
        })
        .await
        .expect("registration failed")
}

fn listing_params(restaurant_id: UserId) -> ListingCreate {
    let start = Utc::now() + Duration::hours(1);
    ListingCreate {
        restaurant_id,
        title: "Surplus platter".into(),
        description: "Assorted mains from today's service".into(),
        cuisine: "Kenyan".into(),
        dietary_tags: vec![DietaryTag::Halal],
        images: vec![],
        original_price: 500,
        discounted_price: 300,
        quantity: 10,
        pickup_window: PickupWindow {
            start,
            end: start + Duration::hours(3),
        },
    }
}

/// Full end-to-end flow with all real actors: publish, order, pay, pick up,
/// review.
#[tokio::test]
async fn test_full_marketplace_flow() {
    let market = Marketplace::new();

    let restaurant = register(&market, Role::Restaurant, "kitchen@example.com").await;
    let customer = register(&market, Role::Customer, "customer@example.com").await;

    let listing = market
        .listings
        .create_listing(listing_params(restaurant.id.clone()))
        .await
        .expect("failed to create listing");
    assert_eq!(listing.discount_percentage, 40);
    assert_eq!(listing.quantity_remaining, 10);
    assert_eq!(listing.status, ListingStatus::Active);

    let order = market
        .orders
        .create_order(OrderRequest {
            customer_id: customer.id.clone(),
            listing_id: listing.id.clone(),
            quantity: 3,
            payment_method: PaymentMethod::Mpesa,
        })
        .await
        .expect("failed to place order");
    assert_eq!(order.total_price, 900);
    assert_eq!(order.platform_fee, 135);
    assert_eq!(order.restaurant_earnings, 765);
    assert_eq!(order.status, OrderStatus::Reserved);
    assert_eq!(order.pickup_code.len(), 6);
    assert!(order.pickup_code.chars().all(|c| c.is_ascii_digit()));

    // stock was taken atomically with the order
    let listing = market
        .listings
        .get_refreshed(listing.id.clone(), Utc::now())
        .await
        .unwrap();
    assert_eq!(listing.quantity_remaining, 7);

    let order = market
        .orders
        .mark_paid(order.id.clone(), customer.id.clone())
        .await
        .expect("failed to mark paid");
    assert_eq!(order.status, OrderStatus::Paid);

    let order = market
        .orders
        .verify_pickup(
            order.id.clone(),
            restaurant.id.clone(),
            order.pickup_code.clone(),
            Utc::now(),
        )
        .await
        .expect("failed to verify pickup");
    assert_eq!(order.status, OrderStatus::PickedUp);
    assert!(order.picked_up_at.is_some());

    let (order, rating, total_ratings) = market
        .orders
        .add_review(order.id.clone(), customer.id.clone(), 5, Some("great".into()))
        .await
        .expect("failed to review");
    assert_eq!(order.rating, Some(5));
    assert_eq!(rating, 5.0);
    assert_eq!(total_ratings, 1);

    // the aggregate landed on the restaurant account
    let restaurant = market
        .users
        .find_by_email("kitchen@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(restaurant.rating, 5.0);
    assert_eq!(restaurant.total_ratings, 1);

    let mine = market
        .orders
        .my_orders(customer.id.clone(), None)
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);

    market.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_cancellation_restores_stock() {
    let market = Marketplace::new();
    let restaurant = register(&market, Role::Restaurant, "kitchen@example.com").await;
    let customer = register(&market, Role::Customer, "customer@example.com").await;

    let listing = market
        .listings
        .create_listing(listing_params(restaurant.id.clone()))
        .await
        .unwrap();

    let order = market
        .orders
        .create_order(OrderRequest {
            customer_id: customer.id.clone(),
            listing_id: listing.id.clone(),
            quantity: 10,
            payment_method: PaymentMethod::Cash,
        })
        .await
        .unwrap();

    let sold_out = market
        .listings
        .get_refreshed(listing.id.clone(), Utc::now())
        .await
        .unwrap();
    assert_eq!(sold_out.status, ListingStatus::SoldOut);
    assert_eq!(sold_out.quantity_remaining, 0);

    let cancelled = market
        .orders
        .cancel(order.id.clone(), customer.id.clone())
        .await
        .unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    let listing = market
        .listings
        .get_refreshed(listing.id.clone(), Utc::now())
        .await
        .unwrap();
    assert_eq!(listing.quantity_remaining, 10);
    assert_eq!(listing.status, ListingStatus::Active);

    // cancelling twice is rejected and releases nothing
    let err = market
        .orders
        .cancel(order.id.clone(), customer.id.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidState(_)));
    let listing = market
        .listings
        .get_refreshed(listing.id, Utc::now())
        .await
        .unwrap();
    assert_eq!(listing.quantity_remaining, 10);

    market.shutdown().await.unwrap();
}

/// Two customers race for the last unit; exactly one order succeeds.
#[tokio::test]
async fn test_concurrent_orders_for_last_unit() {
    let market = Marketplace::new();
    let restaurant = register(&market, Role::Restaurant, "kitchen@example.com").await;
    let alice = register(&market, Role::Customer, "alice@example.com").await;
    let bob = register(&market, Role::Customer, "bob@example.com").await;

    let mut params = listing_params(restaurant.id.clone());
    params.quantity = 1;
    let listing = market.listings.create_listing(params).await.unwrap();

    let request = |customer: &User| OrderRequest {
        customer_id: customer.id.clone(),
        listing_id: listing.id.clone(),
        quantity: 1,
        payment_method: PaymentMethod::Card,
    };
    let (first, second) = tokio::join!(
        market.orders.create_order(request(&alice)),
        market.orders.create_order(request(&bob)),
    );

    assert_eq!(
        first.is_ok() as u32 + second.is_ok() as u32,
        1,
        "exactly one of the racing orders must win: {first:?} / {second:?}"
    );

    let listing = market
        .listings
        .get_refreshed(listing.id, Utc::now())
        .await
        .unwrap();
    assert_eq!(listing.quantity_remaining, 0);
    assert_eq!(listing.status, ListingStatus::SoldOut);

    market.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let market = Marketplace::new();
    register(&market, Role::Customer, "taken@example.com").await;

    // same address with different case and padding still collides
    let err = market
        .users
        .register(UserCreate {
            role: Role::Customer,
            email: "  Taken@Example.COM ".into(),
            password_hash: "$argon2id$test".into(),
            name: "Other".into(),
            phone: "+254700000009".into(),
            business_name: None,
            address: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, UserError::DuplicateEmail(_)));

    market.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_role_checks_on_publish_and_order() {
    let market = Marketplace::new();
    let restaurant = register(&market, Role::Restaurant, "kitchen@example.com").await;
    let customer = register(&market, Role::Customer, "customer@example.com").await;

    let err = market
        .listings
        .create_listing(listing_params(customer.id.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, ListingError::Authorization(_)));

    let listing = market
        .listings
        .create_listing(listing_params(restaurant.id.clone()))
        .await
        .unwrap();
    let err = market
        .orders
        .create_order(OrderRequest {
            customer_id: restaurant.id.clone(),
            listing_id: listing.id.clone(),
            quantity: 1,
            payment_method: PaymentMethod::Cash,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::Authorization(_)));

    // the failed attempt must not have taken stock
    let listing = market
        .listings
        .get_refreshed(listing.id, Utc::now())
        .await
        .unwrap();
    assert_eq!(listing.quantity_remaining, 10);

    market.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_rejected_update_does_not_change_the_stored_listing() {
    use surplus_market::model::ListingUpdate;

    let market = Marketplace::new();
    let restaurant = register(&market, Role::Restaurant, "kitchen@example.com").await;

    let listing = market
        .listings
        .create_listing(listing_params(restaurant.id.clone()))
        .await
        .unwrap();

    let start = Utc::now() + Duration::hours(6);
    let mut patch = ListingUpdate::by(restaurant.id.clone());
    patch.pickup_window = Some(PickupWindow {
        start,
        end: start + Duration::hours(2),
    });
    patch.title = Some("".into());
    let err = market
        .listings
        .update_listing(listing.id.clone(), patch)
        .await
        .unwrap_err();
    assert!(matches!(err, ListingError::Validation(_)));

    let stored = market
        .listings
        .get_refreshed(listing.id, Utc::now())
        .await
        .unwrap();
    assert_eq!(stored.pickup_window, listing.pickup_window);
    assert_eq!(stored.expires_at, listing.expires_at);
    assert_eq!(stored.title, listing.title);

    market.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_browse_filters_and_ordering() {
    let market = Marketplace::new();
    let restaurant = register(&market, Role::Restaurant, "kitchen@example.com").await;

    let mut nyama = listing_params(restaurant.id.clone());
    nyama.title = "Nyama choma platter".into();
    nyama.cuisine = "Kenyan".into();
    nyama.discounted_price = 300;
    market.listings.create_listing(nyama).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let mut curry = listing_params(restaurant.id.clone());
    curry.title = "Vegetable curry".into();
    curry.cuisine = "Indian".into();
    curry.dietary_tags = vec![DietaryTag::Vegan];
    curry.discounted_price = 150;
    market.listings.create_listing(curry).await.unwrap();

    let all = market
        .listings
        .browse(BrowseQuery::at(Utc::now()))
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    // newest first
    assert_eq!(all[0].title, "Vegetable curry");

    let mut query = BrowseQuery::at(Utc::now());
    query.cuisine = Some("indian".into());
    let indian = market.listings.browse(query).await.unwrap();
    assert_eq!(indian.len(), 1);
    assert_eq!(indian[0].title, "Vegetable curry");

    let mut query = BrowseQuery::at(Utc::now());
    query.max_price = Some(200);
    let cheap = market.listings.browse(query).await.unwrap();
    assert_eq!(cheap.len(), 1);

    let mut query = BrowseQuery::at(Utc::now());
    query.dietary_tags = vec![DietaryTag::Vegan];
    let vegan = market.listings.browse(query).await.unwrap();
    assert_eq!(vegan.len(), 1);

    let mut query = BrowseQuery::at(Utc::now());
    query.search = Some("CHOMA".into());
    let found = market.listings.browse(query).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Nyama choma platter");

    market.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_browse_caps_results_at_fifty() {
    let market = Marketplace::new();
    let restaurant = register(&market, Role::Restaurant, "kitchen@example.com").await;

    for i in 0..55 {
        let mut params = listing_params(restaurant.id.clone());
        params.title = format!("Batch {i}");
        market.listings.create_listing(params).await.unwrap();
    }

    let results = market
        .listings
        .browse(BrowseQuery::at(Utc::now()))
        .await
        .unwrap();
    assert_eq!(results.len(), 50);

    let all_mine = market
        .listings
        .listings_for(restaurant.id.clone(), None)
        .await
        .unwrap();
    assert_eq!(all_mine.len(), 55);

    market.shutdown().await.unwrap();
}

/// Expiry is lazy: a listing past its pickup window drops out of browse and
/// refuses reservations on first contact, with no background task involved.
#[tokio::test]
async fn test_expired_listing_is_hidden_and_unorderable() {
    let market = Marketplace::new();
    let restaurant = register(&market, Role::Restaurant, "kitchen@example.com").await;
    let customer = register(&market, Role::Customer, "customer@example.com").await;

    let mut params = listing_params(restaurant.id.clone());
    let start = Utc::now() + Duration::milliseconds(20);
    params.pickup_window = PickupWindow {
        start,
        end: start + Duration::milliseconds(30),
    };
    let listing = market.listings.create_listing(params).await.unwrap();

    tokio::time::sleep(std::time::Duration::from_millis(120)).await;

    let visible = market
        .listings
        .browse(BrowseQuery::at(Utc::now()))
        .await
        .unwrap();
    assert!(visible.is_empty());

    let err = market
        .orders
        .create_order(OrderRequest {
            customer_id: customer.id.clone(),
            listing_id: listing.id.clone(),
            quantity: 1,
            payment_method: PaymentMethod::Mpesa,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::ListingExpired));

    let listing = market
        .listings
        .get_refreshed(listing.id, Utc::now())
        .await
        .unwrap();
    assert_eq!(listing.status, ListingStatus::Expired);

    market.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_insufficient_stock_reports_what_is_left() {
    let market = Marketplace::new();
    let restaurant = register(&market, Role::Restaurant, "kitchen@example.com").await;
    let customer = register(&market, Role::Customer, "customer@example.com").await;

    let listing = market
        .listings
        .create_listing(listing_params(restaurant.id.clone()))
        .await
        .unwrap();

    let err = market
        .orders
        .create_order(OrderRequest {
            customer_id: customer.id.clone(),
            listing_id: listing.id.clone(),
            quantity: 11,
            payment_method: PaymentMethod::Card,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        OrderError::InsufficientStock {
            requested: 11,
            available: 10
        }
    ));

    market.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_ratings_average_across_orders() {
    let market = Marketplace::new();
    let restaurant = register(&market, Role::Restaurant, "kitchen@example.com").await;
    let customer = register(&market, Role::Customer, "customer@example.com").await;

    let listing = market
        .listings
        .create_listing(listing_params(restaurant.id.clone()))
        .await
        .unwrap();

    for rating in [5u8, 3] {
        let order = market
            .orders
            .create_order(OrderRequest {
                customer_id: customer.id.clone(),
                listing_id: listing.id.clone(),
                quantity: 1,
                payment_method: PaymentMethod::Mpesa,
            })
            .await
            .unwrap();
        market
            .orders
            .verify_pickup(
                order.id.clone(),
                restaurant.id.clone(),
                order.pickup_code.clone(),
                Utc::now(),
            )
            .await
            .unwrap();
        market
            .orders
            .add_review(order.id, customer.id.clone(), rating, None)
            .await
            .unwrap();
    }

    let restaurant = market
        .users
        .find_by_email("kitchen@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(restaurant.rating, 4.0);
    assert_eq!(restaurant.total_ratings, 2);

    market.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_wrong_pickup_code_is_rejected() {
    let market = Marketplace::new();
    let restaurant = register(&market, Role::Restaurant, "kitchen@example.com").await;
    let customer = register(&market, Role::Customer, "customer@example.com").await;

    let listing = market
        .listings
        .create_listing(listing_params(restaurant.id.clone()))
        .await
        .unwrap();
    let order = market
        .orders
        .create_order(OrderRequest {
            customer_id: customer.id.clone(),
            listing_id: listing.id,
            quantity: 1,
            payment_method: PaymentMethod::Cash,
        })
        .await
        .unwrap();

    let wrong = if order.pickup_code == "111111" {
        "222222"
    } else {
        "111111"
    };
    let err = market
        .orders
        .verify_pickup(
            order.id.clone(),
            restaurant.id.clone(),
            wrong.into(),
            Utc::now(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidCode));

    // still reserved, still collectable with the right code
    let order = market
        .orders
        .verify_pickup(order.id, restaurant.id, order.pickup_code, Utc::now())
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::PickedUp);

    market.shutdown().await.unwrap();
}
