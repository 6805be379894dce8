//! Runtime orchestration and lifecycle management.
//!
//! - [`KitchenSystem`] - starts, wires and stops the actors
//! - [`setup_tracing`] - initializes logging

pub mod kitchen_system;
pub mod tracing;

pub use kitchen_system::*;
pub use self::tracing::*;
