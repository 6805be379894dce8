//! Error types for the board actor.

use thiserror::Error;

/// Errors that can occur while talking to the board.
///
/// Rejected submissions are not errors; they come back as
/// [`ValidationError`](crate::model::ValidationError) values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BoardError {
    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
