//! Demo walkthrough of the marketplace: a restaurant posts a surplus box, a
//! customer reserves it, picks it up, and leaves a review.
//!
//! Run with `RUST_LOG=info cargo run` for compact logs or `RUST_LOG=debug`
//! for full payloads.

use chrono::{Duration, Utc};
use resource_actor::tracing::setup_tracing;
use surplus_market::clients::OrderRequest;
use surplus_market::lifecycle::Marketplace;
use surplus_market::model::{
    BrowseQuery, DietaryTag, ListingCreate, PaymentMethod, PickupWindow, Role, UserCreate,
};
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting surplus food marketplace");
    let market = Marketplace::new();

    let restaurant = market
        .users
        .register(UserCreate {
            role: Role::Restaurant,
            email: "kitchen@mamaoliech.example".into(),
            password_hash: "$argon2id$demo".into(),
            name: "Mary Oliech".into(),
            phone: "+254700000001".into(),
            business_name: Some("Mama Oliech Kitchen".into()),
            address: None,
        })
        .await
        .map_err(|e| e.to_string())?;
    info!(user_id = %restaurant.id, "Restaurant registered");

    let customer = market
        .users
        .register(UserCreate {
            role: Role::Customer,
            email: "wanjiku@example.com".into(),
            password_hash: "$argon2id$demo".into(),
            name: "Wanjiku".into(),
            phone: "+254700000002".into(),
            business_name: None,
            address: None,
        })
        .await
        .map_err(|e| e.to_string())?;
    info!(user_id = %customer.id, "Customer registered");

    let start = Utc::now() + Duration::hours(1);
    let listing = market
        .listings
        .create_listing(ListingCreate {
            restaurant_id: restaurant.id.clone(),
            title: "End-of-day fish platter".into(),
            description: "Whole tilapia with ugali and greens, made fresh today".into(),
            cuisine: "Kenyan".into(),
            dietary_tags: vec![DietaryTag::GlutenFree],
            images: vec![],
            original_price: 500,
            discounted_price: 300,
            quantity: 10,
            pickup_window: PickupWindow {
                start,
                end: start + Duration::hours(3),
            },
        })
        .await
        .map_err(|e| e.to_string())?;
    info!(listing_id = %listing.id, discount = listing.discount_percentage,
          "Listing published");

    let available = market
        .listings
        .browse(BrowseQuery::at(Utc::now()))
        .await
        .map_err(|e| e.to_string())?;
    info!(count = available.len(), "Browse results");

    let span = tracing::info_span!("order_processing");
    let order = async {
        market
            .orders
            .create_order(OrderRequest {
                customer_id: customer.id.clone(),
                listing_id: listing.id.clone(),
                quantity: 3,
                payment_method: PaymentMethod::Mpesa,
            })
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;
    info!(order_id = %order.id, total = order.total_price, fee = order.platform_fee,
          code = %order.pickup_code, "Order placed");

    let order = market
        .orders
        .verify_pickup(
            order.id.clone(),
            restaurant.id.clone(),
            order.pickup_code.clone(),
            Utc::now(),
        )
        .await
        .map_err(|e| e.to_string())?;
    info!(order_id = %order.id, "Pickup verified");

    let (_, rating, total_ratings) = market
        .orders
        .add_review(
            order.id.clone(),
            customer.id.clone(),
            5,
            Some("Great food, great cause".into()),
        )
        .await
        .map_err(|e| e.to_string())?;
    info!(rating, total_ratings, "Review recorded");

    market.shutdown().await?;
    info!("Demo completed successfully");
    Ok(())
}
