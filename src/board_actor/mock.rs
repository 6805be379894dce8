//! Test helpers that let a test play the board actor.

use crate::board_actor::BoardRequest;
use crate::clients::BoardClient;
use crate::framework::FrameworkError;
use crate::model::{Order, OrderCreate, ValidationError};
use tokio::sync::{mpsc, oneshot};

/// Creates a board client wired to a receiver the test controls.
pub fn create_mock_board(buffer_size: usize) -> (BoardClient, mpsc::Receiver<BoardRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (BoardClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Submit request
pub async fn expect_submit(
    receiver: &mut mpsc::Receiver<BoardRequest>,
) -> Option<(
    OrderCreate,
    oneshot::Sender<Result<Result<Order, ValidationError>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(BoardRequest::Submit { order, respond_to }) => Some((order, respond_to)),
        _ => None,
    }
}
