//! # Generic Actor Server
//!
//! `ResourceActor` is the server half of the framework: it owns the in-memory
//! store for one entity type and processes every [`ResourceRequest`]
//! sequentially in its own Tokio task.
//!
//! # Concurrency Model
//! Sequential processing is the whole point. A check-then-mutate sequence
//! inside a single message (say, "is there stock left? then decrement") can
//! never interleave with another request against the same actor, so the store
//! needs no `Mutex` and the domain logic needs no compare-and-swap. Two
//! clients racing to reserve the last unit of something are serialized by the
//! channel: one wins, the other observes the decremented state.
//!
//! # Uniqueness
//! The actor keeps a side index of [`ActorEntity::unique_key`] values for the
//! entities currently in the store. Creates whose key collides are rejected
//! with [`FrameworkError::Duplicate`] before `on_create` runs, so a rejected
//! create can never have performed side effects against other actors.
//!
//! # Usage Pattern
//!
//! 1. **Create**: `ResourceActor::new(buffer)` returns the actor and its
//!    [`ResourceClient`].
//! 2. **Wire**: dependencies (other clients, external collaborators) are
//!    passed into `actor.run(context)`, not into the constructor.
//! 3. **Run**: spawn the run loop in a background task.
//!
//! ```rust
//! use resource_actor::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Note { id: u32, text: String }
//! #[derive(Debug)] struct NoteCreate { text: String }
//! #[derive(Debug)] struct NoteUpdate { text: String }
//! #[derive(Debug)] enum NoteAction {}
//! #[derive(Debug)] struct NoteFilter;
//! #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
//!
//! #[async_trait]
//! impl ActorEntity for Note {
//!     type Id = u32;
//!     type Create = NoteCreate;
//!     type Update = NoteUpdate;
//!     type Action = NoteAction;
//!     type ActionResult = ();
//!     type Filter = NoteFilter;
//!     type Context = ();
//!     type Error = NoteError;
//!
//!     fn from_create_params(id: u32, params: NoteCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, text: params.text })
//!     }
//!     fn matches(&self, _: &NoteFilter) -> bool { true }
//!     async fn on_update(&mut self, update: NoteUpdate, _: &()) -> Result<(), Self::Error> {
//!         self.text = update.text;
//!         Ok(())
//!     }
//!     async fn handle_action(&mut self, _: NoteAction, _: &()) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Note>::new(10);
//!     tokio::spawn(actor.run(()));
//!     let id = client.create(NoteCreate { text: "hi".into() }).await.unwrap();
//!     assert_eq!(client.get(id).await.unwrap().unwrap().text, "hi");
//! }
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// Owns the state (`store`) plus the unique-key index, and the receiver end
/// of the request channel. See the module docs for the processing model.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    unique_keys: HashMap<String, T::Id>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the MPSC channel; when it is full,
    /// client calls wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            unique_keys: HashMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel
    /// closes (every client dropped).
    ///
    /// # Context Injection
    /// `context` is handed to every entity hook, late-binding dependencies
    /// that were created after the actor was instantiated.
    pub async fn run(mut self, context: T::Context) {
        // Just the type name, e.g. "Listing" instead of the full module path.
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            // Reject duplicates before on_create so a failed
                            // create never leaves side effects behind.
                            if let Some(key) = item.unique_key() {
                                if self.unique_keys.contains_key(&key) {
                                    warn!(entity_type, key, "Duplicate key");
                                    let _ = respond_to.send(Err(FrameworkError::Duplicate(key)));
                                    continue;
                                }
                            }
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.next_id += 1;
                            if let Some(key) = item.unique_key() {
                                self.unique_keys.insert(key, id.clone());
                            }
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Find { filter, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| item.matches(&filter))
                        .cloned()
                        .collect();
                    debug!(entity_type, ?filter, count = items.len(), "Find");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if let Some(item) = self.store.get(&id) {
                        if let Err(e) = item.on_delete(&context).await {
                            warn!(entity_type, %id, error = %e, "on_delete failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        if let Some(key) = item.unique_key() {
                            self.unique_keys.remove(&key);
                        }
                        self.store.remove(&id);
                        info!(entity_type, %id, size = self.store.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
