//! # Board Broadcast
//!
//! Push side of the board. The board actor publishes a fresh
//! [`BoardSnapshot`] into a `tokio::sync::watch` channel whenever the visible
//! order set changes; each [`Subscription`] wraps one receiver.
//!
//! A watch receiver only ever exposes the latest value, so an observer can
//! skip versions but never goes back to an older one after seeing a newer one.
//!
//! Delivery to the outside world (a websocket, a chat message) goes through
//! the [`Observer`] trait. Failures there are logged and dropped: the next
//! change or pull brings the observer back in sync.

use crate::clock::Timestamp;
use crate::model::Order;
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// The ordered board as of one publication.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    /// Bumped on every published change.
    pub version: u64,
    pub taken_at: Timestamp,
    pub orders: Vec<Order>,
}

/// A live feed of board snapshots. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    receiver: watch::Receiver<BoardSnapshot>,
}

impl Subscription {
    pub fn new(receiver: watch::Receiver<BoardSnapshot>) -> Self {
        Self { receiver }
    }

    /// The latest published snapshot. Marks it as seen.
    pub fn current(&mut self) -> BoardSnapshot {
        self.receiver.borrow_and_update().clone()
    }

    /// Waits for a snapshot newer than the last one seen.
    ///
    /// Returns `None` once the board has shut down.
    pub async fn changed(&mut self) -> Option<BoardSnapshot> {
        self.receiver.changed().await.ok()?;
        Some(self.receiver.borrow_and_update().clone())
    }

    pub fn unsubscribe(self) {}
}

/// Errors reported by an observer's transport.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("observer unreachable: {0}")]
    Unreachable(String),

    #[error("delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Something that wants every board change pushed to it.
#[async_trait]
pub trait Observer: Send + Sync + 'static {
    /// Short name used in logs.
    fn name(&self) -> &str;

    async fn deliver(&self, snapshot: &BoardSnapshot) -> Result<(), TransportError>;
}

/// Forwards a subscription to `observer` until the board shuts down.
///
/// The current snapshot is delivered right away, then every newer one.
pub fn spawn_observer<O: Observer>(mut subscription: Subscription, observer: O) -> JoinHandle<()> {
    tokio::spawn(async move {
        let observer_name = observer.name().to_string();
        info!(observer = %observer_name, "Observer attached");

        let mut next = Some(subscription.current());
        while let Some(snapshot) = next {
            match observer.deliver(&snapshot).await {
                Ok(()) => debug!(
                    observer = %observer_name,
                    version = snapshot.version,
                    orders = snapshot.orders.len(),
                    "Delivered"
                ),
                Err(e) => warn!(
                    observer = %observer_name,
                    version = snapshot.version,
                    error = %e,
                    "Delivery failed"
                ),
            }
            next = subscription.changed().await;
        }

        info!(observer = %observer_name, "Observer detached");
    })
}

/// Observer that only logs what it would show.
#[derive(Debug, Clone, Default)]
pub struct LogObserver;

#[async_trait]
impl Observer for LogObserver {
    fn name(&self) -> &str {
        "log"
    }

    async fn deliver(&self, snapshot: &BoardSnapshot) -> Result<(), TransportError> {
        let labels: Vec<&str> = snapshot.orders.iter().map(|order| order.label.as_str()).collect();
        info!(version = snapshot.version, ?labels, "Board");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorder {
        seen: Arc<Mutex<Vec<u64>>>,
        fail_on: Option<u64>,
    }

    #[async_trait]
    impl Observer for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        async fn deliver(&self, snapshot: &BoardSnapshot) -> Result<(), TransportError> {
            if self.fail_on == Some(snapshot.version) {
                return Err(TransportError::DeliveryFailed("socket closed".into()));
            }
            self.seen.lock().unwrap().push(snapshot.version);
            Ok(())
        }
    }

    fn version(v: u64) -> BoardSnapshot {
        BoardSnapshot {
            version: v,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn subscription_sees_latest_only() {
        let (publisher, receiver) = watch::channel(version(1));
        let mut subscription = Subscription::new(receiver);
        assert_eq!(subscription.current().version, 1);

        publisher.send_replace(version(2));
        publisher.send_replace(version(3));
        assert_eq!(subscription.changed().await.unwrap().version, 3);

        drop(publisher);
        assert!(subscription.changed().await.is_none());
    }

    #[tokio::test]
    async fn observer_failures_do_not_stop_forwarding() {
        let (publisher, receiver) = watch::channel(version(1));
        let recorder = Recorder {
            fail_on: Some(2),
            ..Default::default()
        };
        let seen = recorder.seen.clone();
        let handle = spawn_observer(Subscription::new(receiver), recorder);

        tokio::task::yield_now().await;
        publisher.send_replace(version(2));
        tokio::task::yield_now().await;
        publisher.send_replace(version(3));
        tokio::task::yield_now().await;
        drop(publisher);
        handle.await.unwrap();

        let seen = seen.lock().unwrap().clone();
        assert_eq!(seen.first(), Some(&1));
        assert_eq!(seen.last(), Some(&3));
        assert!(!seen.contains(&2));
        assert!(seen.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
