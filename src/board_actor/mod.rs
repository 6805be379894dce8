//! Board actor: the order store, its normalization timer and the broadcast
//! publisher.

pub mod actor;
pub mod error;
pub mod mock;
pub mod store;

pub use actor::*;
pub use error::*;
pub use store::*;

use crate::clients::BoardClient;
use crate::clock::Clock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

pub const DEFAULT_NORMALIZE_INTERVAL: Duration = Duration::from_secs(30);

/// Creates a new Board actor and its client.
pub fn new(
    limits: StoreLimits,
    clock: Arc<dyn Clock>,
    normalize_every: Duration,
) -> (BoardActor, BoardClient) {
    let (sender, receiver) = mpsc::channel(32);
    let normalize_every = normalize_every.max(Duration::from_millis(1));
    let actor = BoardActor::new(receiver, OrderStore::new(limits), clock, normalize_every);
    (actor, BoardClient::new(sender))
}
