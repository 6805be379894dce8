//! The capacity and expiry bounded order collection.
//!
//! [`OrderStore`] is plain data with no locking. The board actor owns the only
//! instance, which serializes every submit and normalization.

use crate::clock::{Timestamp, MINUTE_MS};
use crate::model::{Order, OrderCreate, OrderId, OrderItem, ValidationError};

pub const DEFAULT_CAPACITY: usize = 10;
pub const DEFAULT_GRACE_MINUTES: u32 = 5;

/// Bounds applied by every normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreLimits {
    pub capacity: usize,
    /// How long a finished order stays on the board, in ms.
    pub grace_ms: i64,
}

impl StoreLimits {
    pub fn new(capacity: usize, grace_minutes: u32) -> Self {
        Self {
            capacity,
            grace_ms: i64::from(grace_minutes) * MINUTE_MS,
        }
    }
}

impl Default for StoreLimits {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_GRACE_MINUTES)
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderStore {
    limits: StoreLimits,
    orders: Vec<Order>,
    last_id: u64,
}

impl OrderStore {
    pub fn new(limits: StoreLimits) -> Self {
        Self {
            limits,
            orders: Vec::new(),
            last_id: 0,
        }
    }

    pub fn limits(&self) -> StoreLimits {
        self.limits
    }

    /// Admits a new order at `now`, then normalizes.
    ///
    /// Nothing changes on rejection, not even the id counter.
    pub fn submit(&mut self, create: OrderCreate, now: Timestamp) -> Result<Order, ValidationError> {
        create.validate()?;

        self.last_id = self.last_id.wrapping_add(1);
        let ends_at = now + i64::from(create.prep_duration_minutes) * MINUTE_MS;
        let order = Order {
            id: OrderId(self.last_id),
            label: create.label.trim().to_string(),
            prep_duration_minutes: create.prep_duration_minutes,
            created_at: now,
            ends_at,
            expires_at: ends_at + self.limits.grace_ms,
            items: merge_items(create.items),
        };

        self.orders.insert(0, order.clone());
        self.normalize(now);
        Ok(order)
    }

    /// Drops expired orders, sorts newest first and truncates to capacity.
    ///
    /// Returns whether the visible sequence changed. Running it twice at the
    /// same `now` always reports `false` the second time.
    pub fn normalize(&mut self, now: Timestamp) -> bool {
        let before: Vec<OrderId> = self.orders.iter().map(|order| order.id).collect();

        self.orders.retain(|order| !order.is_expired(now));
        self.orders
            .sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        self.orders.truncate(self.limits.capacity);

        !self.orders.iter().map(|order| order.id).eq(before)
    }

    /// Normalized copy of the current orders.
    pub fn snapshot(&mut self, now: Timestamp) -> Vec<Order> {
        self.normalize(now);
        self.orders.clone()
    }

    /// Orders as of the last normalization, without normalizing again.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }
}

/// One line per name, in first-seen order, quantities summed. Zero lines go.
fn merge_items(items: Vec<OrderItem>) -> Vec<OrderItem> {
    let mut merged: Vec<OrderItem> = Vec::with_capacity(items.len());
    for item in items.into_iter().filter(|item| item.quantity >= 1) {
        match merged.iter_mut().find(|line| line.name == item.name) {
            Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
            None => merged.push(item),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    const T0: Timestamp = 1_700_000_000_000;

    fn create(label: &str, minutes: u32) -> OrderCreate {
        OrderCreate {
            label: label.into(),
            prep_duration_minutes: minutes,
            items: vec![OrderItem::new("Борщ", 1)],
        }
    }

    #[test]
    fn submit_computes_deadlines() {
        let mut store = OrderStore::default();
        let order = store
            .submit(
                OrderCreate {
                    label: "GF-254".into(),
                    prep_duration_minutes: 20,
                    items: vec![OrderItem::new("Борщ", 1), OrderItem::new("Хлеб", 2)],
                },
                T0,
            )
            .unwrap();

        assert_eq!(order.id, OrderId(1));
        assert_eq!(order.created_at, T0);
        assert_eq!(order.ends_at, T0 + 1_200_000);
        assert_eq!(order.expires_at, T0 + 1_500_000);
        assert_eq!(order.items[1], OrderItem::new("Хлеб", 2));

        assert_eq!(store.snapshot(T0 + 19 * MINUTE_MS), vec![order.clone()]);
        assert_eq!(store.snapshot(T0 + 1_499_999), vec![order]);
        assert!(store.snapshot(T0 + 1_500_000).is_empty());
    }

    #[test]
    fn gone_one_ms_after_grace() {
        let mut store = OrderStore::default();
        store.submit(create("GF-254", 20), T0).unwrap();
        assert!(store.snapshot(T0 + 1_500_001).is_empty());
    }

    #[test]
    fn keeps_ten_most_recent() {
        let mut store = OrderStore::default();
        for n in 0..11 {
            store
                .submit(create(&format!("#{n}"), 30), T0 + n * 1_000)
                .unwrap();
        }
        let snapshot = store.snapshot(T0 + 11_000);
        assert_eq!(snapshot.len(), 10);
        assert!(snapshot.iter().all(|order| order.label != "#0"));
        assert_eq!(snapshot[0].label, "#10");
        assert_eq!(snapshot[9].label, "#1");
    }

    #[test]
    fn capacity_holds_for_any_sequence() {
        let mut store = OrderStore::new(StoreLimits::new(3, 5));
        for n in 0..25 {
            store.submit(create("x", 1 + (n % 7) as u32), T0 + n * 500).unwrap();
            assert!(store.len() <= 3);
        }
    }

    #[test]
    fn snapshot_is_newest_first() {
        let mut store = OrderStore::default();
        store.submit(create("old", 60), T0).unwrap();
        store.submit(create("new", 60), T0 + 5_000).unwrap();
        store.submit(create("mid", 60), T0 + 2_000).unwrap();

        let snapshot = store.snapshot(T0 + 6_000);
        let created: Vec<_> = snapshot.iter().map(|order| order.created_at).collect();
        assert_eq!(created, vec![T0 + 5_000, T0 + 2_000, T0]);
    }

    #[test]
    fn same_instant_ties_go_to_later_admission() {
        let mut store = OrderStore::default();
        store.submit(create("first", 10), T0).unwrap();
        store.submit(create("second", 10), T0).unwrap();
        let labels: Vec<_> = store.snapshot(T0).into_iter().map(|order| order.label).collect();
        assert_eq!(labels, vec!["second", "first"]);
    }

    #[test]
    fn snapshot_excludes_expired_orders() {
        let mut store = OrderStore::default();
        store.submit(create("short", 1), T0).unwrap();
        store.submit(create("long", 30), T0).unwrap();

        let now = T0 + 6 * MINUTE_MS;
        let snapshot = store.snapshot(now);
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.iter().all(|order| order.expires_at > now));
    }

    #[test]
    fn normalize_is_idempotent() {
        let mut store = OrderStore::default();
        store.submit(create("a", 1), T0).unwrap();
        store.submit(create("b", 10), T0 + 1).unwrap();

        let later = T0 + 7 * MINUTE_MS;
        assert!(store.normalize(later));
        let once = store.orders().to_vec();
        assert!(!store.normalize(later));
        assert_eq!(store.orders(), once.as_slice());
    }

    #[test]
    fn normalize_without_change_reports_false() {
        let mut store = OrderStore::default();
        assert!(!store.normalize(T0));
        store.submit(create("a", 10), T0).unwrap();
        assert!(!store.normalize(T0 + 1_000));
    }

    #[test]
    fn rejection_leaves_store_untouched() {
        let mut store = OrderStore::default();
        store.submit(create("a", 10), T0).unwrap();
        let before = store.snapshot(T0);

        let empty = OrderCreate {
            label: "b".into(),
            prep_duration_minutes: 10,
            items: vec![],
        };
        assert_eq!(store.submit(empty, T0), Err(ValidationError::EmptyCart));
        assert_eq!(store.submit(create("  ", 10), T0), Err(ValidationError::EmptyLabel));
        assert_eq!(store.snapshot(T0), before);

        // The id counter did not move either.
        assert_eq!(store.submit(create("c", 10), T0).unwrap().id, OrderId(2));
    }

    #[test]
    fn duration_bounds() {
        let mut store = OrderStore::default();
        assert_eq!(store.submit(create("a", 0), T0), Err(ValidationError::InvalidDuration));
        assert_eq!(store.submit(create("a", 241), T0), Err(ValidationError::InvalidDuration));
        assert!(store.submit(create("a", 240), T0).is_ok());
        assert!(store.submit(create("a", 1), T0).is_ok());
    }

    #[test]
    fn label_is_trimmed_on_admission() {
        let mut store = OrderStore::default();
        let order = store.submit(create("  A7 ", 5), T0).unwrap();
        assert_eq!(order.label, "A7");
    }

    #[test]
    fn custom_grace_window() {
        let mut store = OrderStore::new(StoreLimits::new(10, 0));
        let order = store.submit(create("a", 2), T0).unwrap();
        assert_eq!(order.expires_at, order.ends_at);
        assert!(store.snapshot(order.ends_at).is_empty());
    }

    #[test]
    fn duplicate_item_names_are_merged() {
        let mut store = OrderStore::default();
        let order = store
            .submit(
                OrderCreate {
                    label: "A1".into(),
                    prep_duration_minutes: 10,
                    items: vec![
                        OrderItem::new("Чай", 1),
                        OrderItem::new("Хлеб", 0),
                        OrderItem::new("Чай", 2),
                        OrderItem::new("Хлеб", 1),
                    ],
                },
                T0,
            )
            .unwrap();

        assert_eq!(
            order.items,
            vec![OrderItem::new("Чай", 3), OrderItem::new("Хлеб", 1)]
        );
        assert_eq!(store.snapshot(T0)[0].items, order.items);
    }

    #[test]
    fn id_counter_wraps_instead_of_panicking() {
        let mut store = OrderStore::default();
        store.last_id = u64::MAX;
        let order = store.submit(create("a", 10), T0).unwrap();
        assert_eq!(order.id, OrderId(0));
    }
}
