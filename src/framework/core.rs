//! # Core Actor Framework
//!
//! This module defines the generic building blocks for keyed, per-caller state.
//!
//! ## Key Types
//!
//! - [`ActorEntity`]: The trait that every keyed entity must implement.
//! - [`ResourceActor`]: The generic actor that owns the entities.
//! - [`ResourceClient`]: The generic client for communicating with actors.
//! - [`FrameworkError`]: Common errors (e.g., ActorClosed, ActorDropped).

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any keyed entity must implement to be managed by [`ResourceActor`].
///
/// # Architecture Note
/// Entities are addressed by an id the *caller* owns (a chat identity, a
/// device id). There is no explicit create step: the first action sent to an
/// unknown id builds a blank entity with [`ActorEntity::from_id`], and the
/// actor forgets it again once it has been idle for longer than the
/// configured TTL.
///
/// # Async & Context
/// `handle_action` is async so an entity can call other actors. The
/// `Context` type is injected into every call via [`ResourceActor::run`]
/// ("late binding"), which keeps construction free of dependency cycles.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Caller-supplied key for this entity.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Closed set of operations the entity accepts.
    type Action: Send + Sync + Debug;

    /// The result type returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the blank entity for an id seen for the first time.
    fn from_id(id: &Self::Id) -> Self;

    /// Apply one action to the entity.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    /// Called right before an idle entity is dropped.
    fn on_evict(&self) {}
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor.
///
/// - **Get**: read a copy of the entity, if it exists and is not idle.
/// - **Action**: apply an [`ActorEntity::Action`], creating the entity on first use.
/// - **Delete**: forget the entity now; answers whether it existed.
/// - **Count**: number of live (non-idle) entities.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<bool>,
    },
    Count {
        respond_to: Response<usize>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

struct Slot<T> {
    entity: T,
    last_seen: Instant,
}

/// The generic actor that owns a keyed collection of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`store`)
/// and the receiver end of the channel, and processes its messages
/// *sequentially*. No `Mutex` is needed around the store: the task has
/// exclusive ownership of it.
///
/// # Idle Eviction
/// With an `idle_ttl`, an entity untouched for at least that long is treated
/// as gone: lazily, when its id is accessed again, and periodically by a
/// sweep that runs every `idle_ttl` so abandoned entries do not accumulate.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, Slot<T>>,
    idle_ttl: Option<Duration>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    /// * `idle_ttl` - How long an untouched entity survives. `None` (or zero)
    ///   keeps entities until they are deleted.
    pub fn new(buffer_size: usize, idle_ttl: Option<Duration>) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            idle_ttl: idle_ttl.filter(|ttl| !ttl.is_zero()),
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is passed to every [`ActorEntity::handle_action`]
    /// call. It is supplied here rather than in `new()` so it can contain
    /// clients of actors created after this one.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Draft" instead of "kitchen_board::model::draft::Draft")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, idle_ttl = ?self.idle_ttl, "Actor started");

        let sweep_every = self.idle_ttl.unwrap_or(Duration::from_secs(3600));
        let mut sweep = time::interval_at(Instant::now() + sweep_every, sweep_every);
        sweep.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                msg = self.receiver.recv() => {
                    let Some(msg) = msg else { break };
                    self.handle(msg, &context, entity_type).await;
                }
                _ = sweep.tick(), if self.idle_ttl.is_some() => {
                    self.evict_idle(entity_type);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn handle(&mut self, msg: ResourceRequest<T>, context: &T::Context, entity_type: &str) {
        let now = Instant::now();
        match msg {
            ResourceRequest::Get { id, respond_to } => {
                self.expire_if_idle(&id, now, entity_type);
                let item = self.store.get(&id).map(|slot| slot.entity.clone());
                debug!(entity_type, %id, found = item.is_some(), "Get");
                let _ = respond_to.send(Ok(item));
            }
            ResourceRequest::Action {
                id,
                action,
                respond_to,
            } => {
                debug!(entity_type, %id, ?action, "Action");
                self.expire_if_idle(&id, now, entity_type);
                let size = self.store.len();
                let slot = self.store.entry(id.clone()).or_insert_with(|| {
                    info!(entity_type, %id, size = size + 1, "Created");
                    Slot {
                        entity: T::from_id(&id),
                        last_seen: now,
                    }
                });
                slot.last_seen = now;

                let result = slot
                    .entity
                    .handle_action(action, context)
                    .await
                    .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                if let Err(e) = &result {
                    warn!(entity_type, %id, error = %e, "Action failed");
                }
                let _ = respond_to.send(result);
            }
            ResourceRequest::Delete { id, respond_to } => {
                let existed = self.store.remove(&id).is_some();
                info!(entity_type, %id, existed, size = self.store.len(), "Deleted");
                let _ = respond_to.send(Ok(existed));
            }
            ResourceRequest::Count { respond_to } => {
                let live = self
                    .store
                    .values()
                    .filter(|slot| !self.is_idle(slot, now))
                    .count();
                let _ = respond_to.send(Ok(live));
            }
        }
    }

    fn is_idle(&self, slot: &Slot<T>, now: Instant) -> bool {
        self.idle_ttl
            .is_some_and(|ttl| now.duration_since(slot.last_seen) >= ttl)
    }

    fn expire_if_idle(&mut self, id: &T::Id, now: Instant, entity_type: &str) {
        if self.store.get(id).is_some_and(|slot| self.is_idle(slot, now)) {
            if let Some(slot) = self.store.remove(id) {
                slot.entity.on_evict();
                debug!(entity_type, %id, "Expired on access");
            }
        }
    }

    fn evict_idle(&mut self, entity_type: &str) {
        let Some(ttl) = self.idle_ttl else { return };
        let now = Instant::now();
        let before = self.store.len();
        self.store.retain(|id, slot| {
            let keep = now.duration_since(slot.last_seen) < ttl;
            if !keep {
                slot.entity.on_evict();
                debug!(entity_type, %id, "Evicted idle");
            }
            keep
        });
        let evicted = before - self.store.len();
        if evicted > 0 {
            info!(entity_type, evicted, size = self.store.len(), "Sweep");
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe client for interacting with a `ResourceActor`.
///
/// Holds only the sender, so cloning is cheap and clones can be shared
/// across tasks.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Get { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Action {
                id,
                action,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn delete(&self, id: T::Id) -> Result<bool, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Delete { id, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn count(&self) -> Result<usize, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ResourceRequest::Count { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
