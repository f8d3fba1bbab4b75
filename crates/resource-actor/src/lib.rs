//! # Resource Actor
//!
//! Building blocks for type-safe, concurrent actor systems managing stateful
//! resources. The crate implements a Resource-Oriented Architecture on top of
//! the Actor Model: each resource type gets one actor that owns its state and
//! answers a uniform CRUD + Find + Action request set.
//!
//! ## Why this shape
//!
//! - **Isolated state**: each [`ResourceActor`] owns its store outright; no
//!   shared memory, no locks.
//! - **Sequential processing**: messages are handled one at a time, so every
//!   check-then-mutate sequence inside a handler is atomic with respect to
//!   all other requests. Inventory decrements, aggregate updates and state
//!   transitions cannot interleave.
//! - **Coordination by message**: when resources interact (an order reserving
//!   listing stock), the dependency is a cloned client injected as context,
//!   not a direct reference.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]) — domain model plus lifecycle hooks.
//! 2. **Runtime** ([`ResourceActor`]) — message loop, store, unique-key
//!    index.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]) — typed async API
//!    over the channel.
//!
//! Business logic is written once in the entity implementation; the runtime
//! and interface layers are generic.
//!
//! ## Sketch
//!
//! ```rust,ignore
//! // 1. Implement ActorEntity for your domain type.
//! // 2. Create and spawn the actor:
//! let (actor, client) = ResourceActor::<Listing>::new(32);
//! tokio::spawn(actor.run((user_client, media_store)));
//! // 3. Talk to it through the client:
//! let id = client.create(params).await?;
//! let hit = client.perform_action(id, ListingAction::Reserve { .. }).await?;
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are injected at runtime via `run()`, not at construction.
//! Create all actors first (no dependencies yet), then start each with the
//! clients it needs. This late binding keeps the construction order trivial
//! even when resources reference each other.
//!
//! ## Testing
//!
//! [`mock::MockClient`] implements the same channel protocol as a real actor
//! but answers from scripted expectations, for unit tests of client-side
//! logic. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
