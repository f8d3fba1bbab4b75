//! # Generic Messages
//!
//! The message types exchanged between [`ResourceClient`](crate::ResourceClient)
//! and [`ResourceActor`](crate::ResourceActor).
//!
//! # Resource-Oriented Architecture
//! Each actor manages one resource type and answers a standard set of
//! lifecycle requests rather than ad-hoc per-operation messages:
//!
//! - **Create**: lifecycle start, using [`ActorEntity::Create`].
//! - **Get**: fetch the current state of one entity by ID.
//! - **Find**: fetch every entity matching an [`ActorEntity::Filter`] — the
//!   query side backing list endpoints and key lookups.
//! - **Update**: state mutation via [`ActorEntity::Update`].
//! - **Delete**: lifecycle end.
//! - **Action**: resource-specific logic via [`ActorEntity::Action`]; the
//!   escape hatch for anything that does not fit the CRUD shape.
//!
//! The enum is generic over `T: ActorEntity`, so a request built for one
//! resource type cannot be sent to another actor's channel.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Find {
        filter: T::Filter,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
