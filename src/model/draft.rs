//! In-progress orders, one per user.
//!
//! A [`Draft`] is owned by the session actor and never shared; it only turns
//! into shared state when it is handed to the board as an [`OrderCreate`].

use crate::model::{OrderCreate, OrderItem, UserId};
use serde::{Deserialize, Serialize};

/// Where a user is in the composition conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Step {
    #[default]
    Idle,
    AwaitingLabel,
    AwaitingDuration,
    SelectingItems,
}

/// One cart entry. Quantity is always at least 1 while the line exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub name: String,
    #[serde(rename = "qty")]
    pub quantity: u32,
}

/// Item name to quantity, kept in first-added order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Adds one of `name`. Returns the new quantity.
    pub fn add(&mut self, name: &str) -> u32 {
        match self.lines.iter_mut().find(|line| line.name == name) {
            Some(line) => {
                line.quantity += 1;
                line.quantity
            }
            None => {
                self.lines.push(CartLine {
                    name: name.to_string(),
                    quantity: 1,
                });
                1
            }
        }
    }

    /// Removes one of `name`, dropping the line when it reaches zero.
    /// Returns the remaining quantity.
    pub fn remove(&mut self, name: &str) -> u32 {
        let Some(pos) = self.lines.iter().position(|line| line.name == name) else {
            return 0;
        };
        let line = &mut self.lines[pos];
        line.quantity = line.quantity.saturating_sub(1);
        let left = line.quantity;
        if left == 0 {
            self.lines.remove(pos);
        }
        left
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn quantity(&self, name: &str) -> u32 {
        self.lines
            .iter()
            .find(|line| line.name == name)
            .map_or(0, |line| line.quantity)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn to_items(&self) -> Vec<OrderItem> {
        self.lines
            .iter()
            .map(|line| OrderItem::new(line.name.clone(), line.quantity))
            .collect()
    }
}

/// A user's order under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub user: UserId,
    pub step: Step,
    pub label: String,
    pub prep_duration_minutes: Option<u32>,
    pub cart: Cart,
    /// Navigation context only; never submitted.
    pub active_category: Option<String>,
}

impl Draft {
    pub fn new(user: UserId) -> Self {
        Self {
            user,
            step: Step::Idle,
            label: String::new(),
            prep_duration_minutes: None,
            cart: Cart::default(),
            active_category: None,
        }
    }

    /// Blank every field and move to `step`.
    pub fn reset(&mut self, step: Step) {
        self.step = step;
        self.label.clear();
        self.prep_duration_minutes = None;
        self.cart.clear();
        self.active_category = None;
    }

    /// Admission payload for the current contents. A missing duration becomes
    /// 0, which the board rejects as invalid.
    pub fn to_create(&self) -> OrderCreate {
        OrderCreate {
            label: self.label.clone(),
            prep_duration_minutes: self.prep_duration_minutes.unwrap_or(0),
            items: self.cart.to_items(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_counts_up_and_drops_empty_lines() {
        let mut cart = Cart::default();
        assert_eq!(cart.add("Борщ"), 1);
        assert_eq!(cart.add("Хлеб"), 1);
        assert_eq!(cart.add("Борщ"), 2);
        assert_eq!(cart.total(), 3);

        assert_eq!(cart.remove("Борщ"), 1);
        assert_eq!(cart.remove("Борщ"), 0);
        assert_eq!(cart.quantity("Борщ"), 0);
        assert_eq!(cart.lines().len(), 1);

        // Removing something absent is a no-op.
        assert_eq!(cart.remove("Уха"), 0);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn cart_keeps_first_added_order() {
        let mut cart = Cart::default();
        cart.add("Хлеб");
        cart.add("Борщ");
        cart.add("Хлеб");
        let names: Vec<_> = cart.to_items().into_iter().map(|item| item.name).collect();
        assert_eq!(names, vec!["Хлеб", "Борщ"]);
    }

    #[test]
    fn reset_blanks_everything() {
        let mut draft = Draft::new(UserId::from("chef"));
        draft.step = Step::SelectingItems;
        draft.label = "A1".into();
        draft.prep_duration_minutes = Some(15);
        draft.cart.add("Чай");
        draft.active_category = Some("drinks".into());

        draft.reset(Step::AwaitingLabel);
        assert_eq!(draft.step, Step::AwaitingLabel);
        assert!(draft.label.is_empty());
        assert!(draft.prep_duration_minutes.is_none());
        assert!(draft.cart.is_empty());
        assert!(draft.active_category.is_none());
        assert_eq!(draft.user, UserId::from("chef"));
    }

    #[test]
    fn missing_duration_submits_as_zero() {
        let draft = Draft::new(UserId::from("chef"));
        assert_eq!(draft.to_create().prep_duration_minutes, 0);
    }
}
