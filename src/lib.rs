//! # Kitchen Board
//!
//! > **A shared board of kitchen orders, composed one chat message at a time.**
//!
//! Cooks build an order in a short conversation (label, preparation time,
//! items). Once submitted, the order shows up on a read-only display with a
//! countdown, stays there for a grace period after it is due, and then
//! disappears on its own.
//!
//! ## 🏗️ Design
//!
//! Every piece of mutable state lives inside exactly one Tokio task:
//!
//! - The **board actor** owns the order store. Admission, normalization
//!   (expiry + sort + capacity) and publication of one submit happen in a single
//!   message handler, so no reader sees a half-applied change.
//! - The **session actor** is the generic [`ResourceActor`](framework::ResourceActor)
//!   holding one [`Draft`](model::Draft) per user. Drafts never touch shared
//!   state until they are submitted to the board.
//!
//! Both are reached through cheap, cloneable clients.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Time is an input
//! Lifecycle decisions are pure functions of `(state, now)`. The board reads a
//! [`Clock`](clock::Clock); tests drive a [`ManualClock`](clock::ManualClock).
//!
//! ### 2. Async Context Injection
//! The session actor receives the board client through `run(context)` rather
//! than at construction ("Late Binding").
//!
//! ### 3. Pull and push
//! The display can pull [`BoardClient::snapshot`](clients::BoardClient::snapshot)
//! at any rate, or [`subscribe`](clients::BoardClient::subscribe) and receive
//! each new [`BoardSnapshot`](broadcast::BoardSnapshot). A periodic
//! normalization makes expired orders disappear even when nobody asks.
//!
//! ### 4. Errors are values where users are concerned
//! Bad input comes back as [`Reply::Invalid`](model::Reply::Invalid), denied
//! users as [`Reply::AccessDenied`](model::Reply::AccessDenied). Only a dead
//! actor is an `Err`.
//!
//! ## 🗺️ Module Tour
//!
//! - [`framework`]: generic keyed actor, client trait and mocks
//! - [`board_actor`]: order store, normalization timer, broadcast publisher
//! - [`session_actor`]: the composition state machine
//! - [`clients`]: `BoardClient`, `SessionClient`
//! - [`broadcast`]: snapshots, subscriptions, observers
//! - [`projection`]: remaining time, urgency tier and visibility for the display
//! - [`config`], [`access`], [`clock`], [`lifecycle`]
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run -- --config board.toml
//! cargo test
//! ```

pub mod access;
pub mod board_actor;
pub mod broadcast;
pub mod clients;
pub mod clock;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod projection;
pub mod session_actor;
