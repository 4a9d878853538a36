//! # Cart Types
//!
//! The cart reducer. Every operation takes a state and returns the next one;
//! nothing is mutated in place, so a view holding an older snapshot keeps
//! seeing consistent data.
//!
//! Invariants kept by every transition:
//! - at most one entry per `id`
//! - every entry has `quantity >= 1`
//! - entries stay in the order they were first added

use crate::product::Price;
use serde::{Deserialize, Serialize};

/// A line in the cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Meal ID
    pub id: String,

    /// Meal name (denormalized for display)
    pub name: String,

    /// Unit price
    pub price: Price,

    /// Quantity, never zero while the entry is in a cart
    pub quantity: u32,
}

impl CartItem {
    /// Create a single-quantity entry
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Price) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity: 1,
        }
    }

    /// Price of this line (`price * quantity`)
    pub fn total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Snapshot of the cart contents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    items: Vec<CartItem>,
}

impl CartState {
    /// An empty cart
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Items in insertion order
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up an entry by meal ID
    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Add one unit of `candidate`.
    ///
    /// An existing entry with the same ID gets its quantity bumped and keeps
    /// its name and price. Otherwise a new entry with quantity 1 is appended;
    /// the candidate's own quantity is ignored.
    pub fn with_item_added(&self, candidate: &CartItem) -> CartState {
        let mut items = self.items.clone();

        match items.iter_mut().find(|item| item.id == candidate.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(1),
            None => items.push(CartItem {
                id: candidate.id.clone(),
                name: candidate.name.clone(),
                price: candidate.price,
                quantity: 1,
            }),
        }

        CartState { items }
    }

    /// Remove one unit of the entry with `id`.
    ///
    /// Unknown IDs leave the cart as it was. An entry at quantity 1 is
    /// dropped from the list.
    pub fn with_item_removed(&self, id: &str) -> CartState {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            return self.clone();
        };

        let mut items = self.items.clone();
        if items[index].quantity > 1 {
            items[index].quantity -= 1;
        } else {
            items.remove(index);
        }

        CartState { items }
    }

    /// Sum of `price * quantity` over all entries
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::total).sum()
    }

    /// Number of units in the cart (the header badge count)
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.quantity))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct entries
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn item(id: &str, dollars: f64) -> CartItem {
        CartItem::new(id, format!("Meal {}", id), Price::new(dollars))
    }

    fn assert_invariants(cart: &CartState) {
        let mut seen = HashSet::new();
        for entry in cart.items() {
            assert!(entry.quantity >= 1, "entry {} has zero quantity", entry.id);
            assert!(seen.insert(entry.id.clone()), "duplicate entry {}", entry.id);
        }
    }

    #[test]
    fn test_add_appends_then_aggregates() {
        let a = item("a", 5.0);
        let b = item("b", 3.5);

        let cart = CartState::new()
            .with_item_added(&a)
            .with_item_added(&b)
            .with_item_added(&a);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].id, "a");
        assert_eq!(cart.items()[0].quantity, 2);
        assert_eq!(cart.items()[1].id, "b");
        assert_eq!(cart.items()[1].quantity, 1);
    }

    #[test]
    fn test_add_ignores_candidate_quantity_and_keeps_first_attributes() {
        let mut first = item("a", 5.0);
        first.quantity = 7;
        let mut renamed = item("a", 9.0);
        renamed.name = "Renamed".to_string();

        let cart = CartState::new().with_item_added(&first);
        assert_eq!(cart.get("a").unwrap().quantity, 1);

        let cart = cart.with_item_added(&renamed);
        let entry = cart.get("a").unwrap();
        assert_eq!(entry.quantity, 2);
        assert_eq!(entry.name, "Meal a");
        assert_eq!(entry.price, Price::new(5.0));
    }

    #[test]
    fn test_remove_decrements_then_drops() {
        let a = item("a", 5.0);
        let cart = CartState::new().with_item_added(&a).with_item_added(&a);

        let cart = cart.with_item_removed("a");
        assert_eq!(cart.get("a").unwrap().quantity, 1);

        let cart = cart.with_item_removed("a");
        assert!(cart.get("a").is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_of_extreme_prices_saturates() {
        let expensive = CartItem::new("x", "Gold Leaf Platter", Price::from_cents(i64::MAX));
        let cart = CartState::new()
            .with_item_added(&expensive)
            .with_item_added(&expensive)
            .with_item_added(&item("a", 5.0));

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), Price::from_cents(i64::MAX));
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let cart = CartState::new().with_item_added(&item("a", 5.0));
        assert_eq!(cart.with_item_removed("zzz"), cart);
        assert_eq!(CartState::new().with_item_removed("a"), CartState::new());
    }

    #[test]
    fn test_add_then_remove_restores_state() {
        let base = CartState::new()
            .with_item_added(&item("a", 1.0))
            .with_item_added(&item("b", 2.0));
        let fresh = item("c", 4.0);

        assert_eq!(base.with_item_added(&fresh).with_item_removed("c"), base);
    }

    #[test]
    fn test_totals_follow_quantity() {
        let a = item("a", 5.0);

        let once = CartState::new().with_item_added(&a);
        let twice = once.with_item_added(&a);
        assert_eq!(twice.total(), Price::new(10.0));

        let back = twice.with_item_removed("a");
        assert_eq!(back.total(), Price::new(5.0));

        let empty = back.with_item_removed("a");
        assert_eq!(empty.total(), Price::ZERO);
        assert!(empty.get("a").is_none());
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let cart = CartState::new()
            .with_item_added(&item("a", 1.0))
            .with_item_added(&item("a", 1.0))
            .with_item_added(&item("b", 1.0));

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_invariants_hold_over_mixed_sequences() {
        let ids = ["a", "b", "c", "d"];
        let mut cart = CartState::new();
        // linear congruential walk over add/remove so every branch gets hit
        let mut seed: u32 = 17;

        for _ in 0..500 {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            let id = ids[(seed >> 16) as usize % ids.len()];
            cart = if (seed >> 8) % 3 == 0 {
                cart.with_item_removed(id)
            } else {
                cart.with_item_added(&item(id, 2.25))
            };
            assert_invariants(&cart);
        }
    }

    #[test]
    fn test_serializes_to_order_item_shape() {
        let cart = CartState::new().with_item_added(&item("a", 5.0));
        let json = serde_json::to_value(cart.items()).unwrap();

        assert_eq!(
            json,
            serde_json::json!([{ "id": "a", "name": "Meal a", "price": 5.0, "quantity": 1 }])
        );
    }
}
