//! # Board Actor
//!
//! Single owner of the [`OrderStore`] and of the broadcast publisher.
//!
//! # Architecture Note
//! One task drains the request channel and the normalization timer, so
//! admission + normalization + publication of one submit completes before any
//! other request or tick is looked at. Readers only ever see fully normalized
//! snapshots.

use crate::board_actor::OrderStore;
use crate::broadcast::{BoardSnapshot, Subscription};
use crate::clock::Clock;
use crate::framework::Response;
use crate::model::{Order, OrderCreate, ValidationError};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Messages understood by the board actor.
///
/// - **Submit**: admit an order; answers the order or why it was rejected.
/// - **Snapshot**: freshly normalized board (pull).
/// - **Subscribe**: live feed starting at the current board (push).
/// - **Normalize**: run one normalization pass now; answers whether it changed anything.
#[derive(Debug)]
pub enum BoardRequest {
    Submit {
        order: OrderCreate,
        respond_to: Response<Result<Order, ValidationError>>,
    },
    Snapshot {
        respond_to: Response<BoardSnapshot>,
    },
    Subscribe {
        respond_to: Response<Subscription>,
    },
    Normalize {
        respond_to: Response<bool>,
    },
}

pub struct BoardActor {
    receiver: mpsc::Receiver<BoardRequest>,
    store: OrderStore,
    clock: Arc<dyn Clock>,
    publisher: watch::Sender<BoardSnapshot>,
    normalize_every: Duration,
}

impl BoardActor {
    pub fn new(
        receiver: mpsc::Receiver<BoardRequest>,
        store: OrderStore,
        clock: Arc<dyn Clock>,
        normalize_every: Duration,
    ) -> Self {
        let initial = BoardSnapshot {
            version: 0,
            taken_at: clock.now(),
            orders: store.orders().to_vec(),
        };
        let (publisher, _) = watch::channel(initial);
        Self {
            receiver,
            store,
            clock,
            publisher,
            normalize_every,
        }
    }

    /// Processes requests and normalization ticks until every client is gone.
    pub async fn run(mut self) {
        let limits = self.store.limits();
        info!(
            capacity = limits.capacity,
            grace_ms = limits.grace_ms,
            normalize_every = ?self.normalize_every,
            "Board started"
        );

        let mut tick = time::interval_at(Instant::now() + self.normalize_every, self.normalize_every);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                msg = self.receiver.recv() => {
                    let Some(msg) = msg else { break };
                    self.handle(msg);
                }
                _ = tick.tick() => {
                    if self.normalize() {
                        info!(size = self.store.len(), "Periodic normalization changed the board");
                    }
                }
            }
        }

        info!(size = self.store.len(), version = self.version(), "Shutdown");
    }

    fn handle(&mut self, msg: BoardRequest) {
        match msg {
            BoardRequest::Submit { order, respond_to } => {
                debug!(?order, "Submit");
                let result = self.store.submit(order, self.clock.now());
                match &result {
                    Ok(order) => {
                        info!(order_id = %order.id, label = %order.label, size = self.store.len(), "Admitted");
                        self.publish();
                    }
                    Err(reason) => warn!(%reason, "Rejected"),
                }
                let _ = respond_to.send(Ok(result));
            }
            BoardRequest::Snapshot { respond_to } => {
                self.normalize();
                let snapshot = BoardSnapshot {
                    version: self.version(),
                    taken_at: self.clock.now(),
                    orders: self.store.orders().to_vec(),
                };
                debug!(version = snapshot.version, size = snapshot.orders.len(), "Snapshot");
                let _ = respond_to.send(Ok(snapshot));
            }
            BoardRequest::Subscribe { respond_to } => {
                self.normalize();
                let subscription = Subscription::new(self.publisher.subscribe());
                info!(observers = self.publisher.receiver_count(), "Subscribed");
                let _ = respond_to.send(Ok(subscription));
            }
            BoardRequest::Normalize { respond_to } => {
                let changed = self.normalize();
                let _ = respond_to.send(Ok(changed));
            }
        }
    }

    /// Normalizes and publishes if the visible set changed.
    fn normalize(&mut self) -> bool {
        let changed = self.store.normalize(self.clock.now());
        if changed {
            self.publish();
        }
        changed
    }

    fn publish(&mut self) {
        let snapshot = BoardSnapshot {
            version: self.version() + 1,
            taken_at: self.clock.now(),
            orders: self.store.orders().to_vec(),
        };
        debug!(version = snapshot.version, observers = self.publisher.receiver_count(), "Publish");
        self.publisher.send_replace(snapshot);
    }

    fn version(&self) -> u64 {
        self.publisher.borrow().version
    }
}
