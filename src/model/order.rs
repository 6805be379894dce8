//! Admitted kitchen orders and the payload used to admit them.
//!
//! Orders are owned by the board actor once admitted and are immutable from
//! then on; everything outside the board works with clones taken from a
//! snapshot.

use crate::clock::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

pub const MIN_PREP_MINUTES: u32 = 1;
pub const MAX_PREP_MINUTES: u32 = 240;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// One line of an order: an item name and how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    #[serde(rename = "qty")]
    pub quantity: u32,
}

impl OrderItem {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub label: String,
    pub prep_duration_minutes: u32,
    pub created_at: Timestamp,
    /// `created_at + prep_duration_minutes` minutes.
    pub ends_at: Timestamp,
    /// `ends_at + grace`. The order disappears from the board at this instant.
    pub expires_at: Timestamp,
    pub items: Vec<OrderItem>,
}

impl Order {
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at <= now
    }
}

/// Payload for admitting a new order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCreate {
    pub label: String,
    pub prep_duration_minutes: u32,
    pub items: Vec<OrderItem>,
}

impl OrderCreate {
    /// Checks the admission constraints, in this order: label, duration, items.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.label.trim().is_empty() {
            return Err(ValidationError::EmptyLabel);
        }
        if !(MIN_PREP_MINUTES..=MAX_PREP_MINUTES).contains(&self.prep_duration_minutes) {
            return Err(ValidationError::InvalidDuration);
        }
        if !self.items.iter().any(|item| item.quantity >= 1) {
            return Err(ValidationError::EmptyCart);
        }
        Ok(())
    }
}

/// Input that cannot be admitted or applied. Always recoverable.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
pub enum ValidationError {
    #[error("order label must not be empty")]
    EmptyLabel,

    #[error("order must contain at least one item")]
    EmptyCart,

    #[error("preparation time must be a whole number of minutes from 1 to 240")]
    InvalidDuration,

    #[error("unknown item: {0}")]
    UnknownItem(String),
}
