use crate::board_actor::{BoardError, BoardRequest};
use crate::broadcast::{BoardSnapshot, Subscription};
use crate::framework::FrameworkError;
use crate::model::{Order, OrderCreate, ValidationError};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

/// Client for interacting with the Board actor.
///
/// This is the display-facing API as well: `snapshot` is the pull side and
/// `subscribe` the push side of the board.
#[derive(Clone)]
pub struct BoardClient {
    sender: mpsc::Sender<BoardRequest>,
}

impl BoardClient {
    pub fn new(sender: mpsc::Sender<BoardRequest>) -> Self {
        Self { sender }
    }

    /// Admits an order. The inner result carries the validation outcome.
    #[instrument(skip(self, order), fields(label = %order.label))]
    pub async fn submit(&self, order: OrderCreate) -> Result<Result<Order, ValidationError>, BoardError> {
        debug!(?order, "submit called");
        self.request(|respond_to| BoardRequest::Submit { order, respond_to }).await
    }

    /// Current board, freshly normalized.
    #[instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<BoardSnapshot, BoardError> {
        self.request(|respond_to| BoardRequest::Snapshot { respond_to }).await
    }

    /// Live feed of the board. `current()` on the result is the board right now.
    #[instrument(skip(self))]
    pub async fn subscribe(&self) -> Result<Subscription, BoardError> {
        self.request(|respond_to| BoardRequest::Subscribe { respond_to }).await
    }

    /// Runs a normalization pass immediately. Returns whether it changed the board.
    #[instrument(skip(self))]
    pub async fn normalize(&self) -> Result<bool, BoardError> {
        self.request(|respond_to| BoardRequest::Normalize { respond_to }).await
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> BoardRequest,
    ) -> Result<R, BoardError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| Self::map_error(FrameworkError::ActorClosed))?;
        response
            .await
            .map_err(|_| Self::map_error(FrameworkError::ActorDropped))?
            .map_err(Self::map_error)
    }

    fn map_error(e: FrameworkError) -> BoardError {
        BoardError::ActorCommunicationError(e.to_string())
    }
}
