//! # System Lifecycle & Orchestration
//!
//! Starting the marketplace means creating three actors and wiring them
//! together. Dependencies are injected late, via `run(context)`, so the
//! dependency graph can be built without circular references:
//!
//! - **User actor** — no dependencies
//! - **Listing actor** — needs the user client (owner role checks) and a
//!   media store (image deletion)
//! - **Order actor** — needs the user and listing clients
//!
//! Shutdown is by channel closure: dropping every client closes the actors'
//! receivers, each actor drains its queue and exits, and `shutdown` awaits
//! the task handles. The clients held inside actor contexts are clones and
//! do not keep the system alive because the dependency graph is acyclic.

use crate::clients::{ListingClient, OrderClient, UserClient};
use crate::media::{NullMediaStore, SharedMediaStore};
use crate::{listing_actor, order_actor, user_actor};
use std::sync::Arc;
use tracing::{error, info};

/// The running marketplace: three actors and their typed clients.
pub struct Marketplace {
    /// Client for accounts and the rating aggregate.
    pub users: UserClient,

    /// Client for the catalog and its stock.
    pub listings: ListingClient,

    /// Client for reservations and the order lifecycle.
    pub orders: OrderClient,

    /// Task handles for all running actors, awaited on shutdown.
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Marketplace {
    /// Starts the system with a no-op media store.
    pub fn new() -> Self {
        Self::with_media(Arc::new(NullMediaStore))
    }

    /// Starts the system against the given media host.
    pub fn with_media(media: SharedMediaStore) -> Self {
        let (user_actor, user_client) = user_actor::new();
        let (listing_actor, listing_client) = listing_actor::new();
        let (order_actor, order_client) = order_actor::new();

        let users = UserClient::new(user_client);
        let listings = ListingClient::new(listing_client);
        let orders = OrderClient::new(order_client);

        let user_handle = tokio::spawn(user_actor.run(()));
        let listing_handle = tokio::spawn(listing_actor.run((users.clone(), media)));
        let order_handle = tokio::spawn(order_actor.run((users.clone(), listings.clone())));

        Self {
            users,
            listings,
            orders,
            handles: vec![user_handle, listing_handle, order_handle],
        }
    }

    /// Gracefully shuts the system down: closes every client channel, then
    /// waits for the actors to drain and exit.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down marketplace...");
        drop(self.orders);
        drop(self.listings);
        drop(self.users);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }
        info!("Marketplace shutdown complete.");
        Ok(())
    }
}

impl Default for Marketplace {
    fn default() -> Self {
        Self::new()
    }
}
