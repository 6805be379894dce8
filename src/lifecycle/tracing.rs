//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a `tracing-subscriber` fmt subscriber filtered
//! by `RUST_LOG`.
//!
//! The format is compact and hides the module prefix (`with_target(false)`);
//! the structured fields (`entity_type`, `user`, `order_id`, `version`) carry
//! the context instead.
//!
//! ```bash
//! RUST_LOG=info cargo run      # lifecycle, admissions, publications
//! RUST_LOG=debug cargo run     # plus every intent and request payload
//! RUST_LOG=kitchen_board::broadcast=debug cargo run
//! ```
//!
//! A submission at `info` level reads roughly:
//!
//! ```text
//! INFO Created entity_type="Draft" id=user_42 size=1
//! INFO dispatch{user=user_42}: Admitted order_id=order_1 label=GF-254 size=1
//! INFO dispatch{user=user_42}: Draft submitted user=user_42 order_id=order_1 label=GF-254
//! INFO Board version=1 labels=["GF-254"]
//! ```
//!
//! Calling it twice panics, as `init()` does; tests that want log output use
//! [`try_setup_tracing`].

/// Installs the global subscriber.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}

/// Like [`setup_tracing`], but ignores an already installed subscriber.
pub fn try_setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .with_test_writer()
        .try_init();
}
