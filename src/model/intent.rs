//! Inbound intents from the chat transport and the replies sent back.
//!
//! Rendering a [`Reply`] (editing a message, sending a new one) is up to the
//! transport. The core only says what the user should see next.

use crate::model::{Catalog, CartLine, Draft, Order, ValidationError};
use serde::Serialize;

/// The closed set of user actions a session understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Start,
    Text(String),
    AddItem(String),
    RemoveItem(String),
    Clear,
    Restart,
    Submit,
}

/// Acknowledgment for one intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Reply {
    /// Draft blanked; waiting for the order label.
    AskLabel,
    /// Label stored; waiting for the preparation time in minutes.
    AskDuration,
    /// Item selection view to (re)render.
    Menu(MenuView),
    /// The order was admitted to the board.
    Submitted(Order),
    /// Input rejected. The draft is unchanged; `menu` is set while selecting items.
    Invalid {
        reason: ValidationError,
        menu: Option<MenuView>,
    },
    /// Input does not fit the current step; the user should start over.
    RestartRequired,
    AccessDenied,
    /// The board could not be reached. The draft is kept.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTab {
    pub key: String,
    pub title: String,
    pub items: Vec<String>,
}

/// Everything needed to redraw the item selection screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuView {
    pub label: String,
    pub prep_duration_minutes: Option<u32>,
    pub categories: Vec<CategoryTab>,
    pub active_category: Option<String>,
    /// Items of the active category, empty when none is active.
    pub items: Vec<String>,
    pub cart: Vec<CartLine>,
    pub total_items: u32,
}

impl MenuView {
    pub fn build(draft: &Draft, catalog: &Catalog) -> Self {
        let items = draft
            .active_category
            .as_deref()
            .and_then(|key| catalog.category(key))
            .map(|category| category.items.clone())
            .unwrap_or_default();

        Self {
            label: draft.label.clone(),
            prep_duration_minutes: draft.prep_duration_minutes,
            categories: catalog
                .categories()
                .iter()
                .map(|category| CategoryTab {
                    key: category.key.clone(),
                    title: category.display_title().to_string(),
                    items: category.items.clone(),
                })
                .collect(),
            active_category: draft.active_category.clone(),
            items,
            cart: draft.cart.lines().to_vec(),
            total_items: draft.cart.total(),
        }
    }
}
