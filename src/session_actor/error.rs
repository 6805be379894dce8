//! Error types for the session actor.

use thiserror::Error;

/// Errors that can occur while talking to the session registry.
///
/// Bad input and denied access are answered with a
/// [`Reply`](crate::model::Reply), never with an error.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
