//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every resource (User, Listing,
//! Order, …) implements to be managed by the generic [`ResourceActor`].
//! Associated types pin down the DTOs, actions, filters, context, and error
//! type for each resource, and lifecycle hooks (`on_create`, `on_update`,
//! `on_delete`, `handle_action`) carry the business logic.
//!
//! # Architecture Note
//! The `ResourceActor` loop is written once against this trait; every domain
//! type plugs in its own payloads. A `Listing` actor can only receive a
//! `ListingCreate`, never an `OrderCreate` — the compiler rules that class of
//! bug out entirely.
//!
//! Two pieces go beyond plain CRUD:
//!
//! - **Filters** ([`ActorEntity::Filter`], [`ActorEntity::matches`]) give the
//!   actor a query side. The actor scans its store and returns every entity
//!   the filter matches; ordering and limits are the caller's concern.
//! - **Unique keys** ([`ActorEntity::unique_key`]) let an entity nominate one
//!   value (an email, a pickup code) that must be unique among live entities.
//!   The actor maintains the index and rejects colliding creates with
//!   [`FrameworkError::Duplicate`](crate::FrameworkError::Duplicate) *before*
//!   any side-effecting hook runs.
//!
//! [`ResourceActor`]: crate::ResourceActor

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by
/// [`ResourceActor`](crate::ResourceActor).
///
/// # Async & Context
/// The trait is `#[async_trait]` so hooks can call other actors. The
/// `Context` associated type is injected into every hook at runtime via
/// `ResourceActor::run`, which late-binds dependencies (clients of other
/// actors, external collaborators) after construction.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum of resource-specific operations (e.g. `Reserve`, `Cancel`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Query predicate evaluated against every entity in the store.
    type Filter: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// # Design Note: Error Granularity
    /// One error enum per actor, not one per message. The enum is the union
    /// of everything the actor can report; clients that need the precise
    /// variant recover it by downcasting
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from the ID and creation payload.
    /// This is called synchronously before `on_create`; input validation
    /// that needs no external lookups belongs here.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// A value that must be unique among live entities of this type, or
    /// `None` to disable the check.
    ///
    /// The key is evaluated when the entity enters and leaves the store;
    /// entities must not change their key afterwards.
    fn unique_key(&self) -> Option<String> {
        None
    }

    /// Whether this entity satisfies the given filter.
    fn matches(&self, filter: &Self::Filter) -> bool;

    // --- Lifecycle Hooks (Async) ---

    /// Called after construction and the uniqueness check, before the entity
    /// is inserted. Side effects against other actors (role checks, stock
    /// reservation) belong here: a failure discards the entity.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    ///
    /// Actions run to completion before the next message is processed, so a
    /// check-then-mutate sequence inside one action is atomic with respect to
    /// every other request against this actor.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
