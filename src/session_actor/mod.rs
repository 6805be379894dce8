//! Session registry: one [`Draft`](crate::model::Draft) per user, driven by intents.

pub mod entity;
pub mod error;

pub use error::*;

use crate::access::AccessPolicy;
use crate::clients::{BoardClient, SessionClient};
use crate::framework::ResourceActor;
use crate::model::{Catalog, Draft};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

/// Dependencies injected into every draft transition.
#[derive(Clone)]
pub struct SessionContext {
    pub board: BoardClient,
    pub catalog: Arc<Catalog>,
}

/// Creates a new Session actor and its client.
///
/// Drafts untouched for `idle_ttl` are discarded; `None` keeps them forever.
pub fn new(idle_ttl: Option<Duration>, access: Arc<dyn AccessPolicy>) -> (ResourceActor<Draft>, SessionClient) {
    let (actor, generic_client) = ResourceActor::new(32, idle_ttl);
    let client = SessionClient::new(generic_client, access);

    (actor, client)
}
