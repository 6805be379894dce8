//! Generic actor framework for keyed, per-caller state.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that entity types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns the entities and evicts idle ones
//! - [`ResourceClient`] - Type-safe client for sending requests to the actor
//! - [`ActorClient`] - Trait domain clients implement to inherit `get`/`delete`
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod client_trait;
pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use client_trait::ActorClient;
pub use self::core::*;
