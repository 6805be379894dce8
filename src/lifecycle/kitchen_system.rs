use crate::access::AccessPolicy;
use crate::clients::{BoardClient, SessionClient};
use crate::clock::Clock;
use crate::config::BoardConfig;
use crate::session_actor::SessionContext;
use std::sync::Arc;
use tracing::{error, info};

/// The runtime orchestrator for the kitchen board.
///
/// `KitchenSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping both actors
/// - **Dependency Wiring**: The session actor gets the board client and the catalog
///   through its run context
///
/// # Architecture
///
/// - **Board Actor**: Owns the order store, the normalization timer and the broadcast
/// - **Session Actor**: One draft per user, submits finished drafts to the board
///
/// # Example
///
/// ```ignore
/// let config = BoardConfig::default();
/// let access = config.access_policy();
/// let system = KitchenSystem::new(&config, Arc::new(SystemClock), access);
///
/// system.sessions.dispatch(user.clone(), Intent::Start).await?;
/// let board = system.board.snapshot().await?;
///
/// system.shutdown().await?;
/// ```
pub struct KitchenSystem {
    /// Client for the order board (submit, pull, subscribe)
    pub board: BoardClient,

    /// Client for the per-user composition sessions
    pub sessions: SessionClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl KitchenSystem {
    /// Spawns the board and session actors and wires them together.
    pub fn new(config: &BoardConfig, clock: Arc<dyn Clock>, access: Arc<dyn AccessPolicy>) -> Self {
        // 1. Create actors
        let (board_actor, board) =
            crate::board_actor::new(config.limits(), clock, config.normalize_interval());
        let (session_actor, sessions) = crate::session_actor::new(config.idle_ttl(), access);

        // 2. Start actors with injected context
        let board_handle = tokio::spawn(board_actor.run());
        let session_handle = tokio::spawn(session_actor.run(SessionContext {
            board: board.clone(),
            catalog: Arc::new(config.catalog()),
        }));

        info!(
            categories = config.catalog.len(),
            capacity = config.store.capacity,
            "Kitchen system started"
        );

        Self {
            board,
            sessions,
            handles: vec![session_handle, board_handle],
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the clients closes the request channels. The session actor
    /// goes first; once it has exited, its context (holding the last board
    /// client) is dropped and the board actor follows.
    ///
    /// Clones of the clients held elsewhere keep their actor alive, so drop
    /// them before calling this.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.sessions);
        drop(self.board);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
