//! Type-safe wrappers around the actors' request channels.

pub mod board_client;
pub mod session_client;

pub use board_client::*;
pub use session_client::*;
