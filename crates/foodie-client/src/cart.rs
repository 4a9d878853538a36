//! # Cart Store
//!
//! The shared, observable cart. Every view that needs the cart gets a clone
//! of the same `CartStore`; intents go through it and views `subscribe` to
//! snapshots.

use foodie_core::{CartItem, CartState, Meal, Price};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Shared cart handle
#[derive(Debug, Clone)]
pub struct CartStore {
    state: Arc<watch::Sender<CartState>>,
}

impl CartStore {
    /// An empty cart
    pub fn new() -> Self {
        let (state, _) = watch::channel(CartState::new());
        Self {
            state: Arc::new(state),
        }
    }

    /// Current contents
    pub fn snapshot(&self) -> CartState {
        self.state.borrow().clone()
    }

    /// Watch cart changes
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.state.subscribe()
    }

    /// Add one unit of `candidate`
    pub fn add_item(&self, candidate: &CartItem) {
        self.state.send_modify(|cart| {
            *cart = cart.with_item_added(candidate);
            debug!(id = %candidate.id, items = cart.item_count(), "added to cart");
        });
    }

    /// Add one unit of a catalog meal
    pub fn add_meal(&self, meal: &Meal) {
        self.add_item(&meal.to_cart_item());
    }

    /// Remove one unit of `id`. Unknown IDs change nothing and notify no one.
    pub fn remove_item(&self, id: &str) {
        self.state.send_if_modified(|cart| {
            let next = cart.with_item_removed(id);
            if next == *cart {
                debug!(id, "remove ignored, not in cart");
                return false;
            }
            *cart = next;
            debug!(id, items = cart.item_count(), "removed from cart");
            true
        });
    }

    /// Empty the cart (after a confirmed order)
    pub fn clear(&self) {
        self.state.send_modify(|cart| {
            debug!(items = cart.item_count(), "clearing cart");
            *cart = CartState::new();
        });
    }

    pub fn total(&self) -> Price {
        self.state.borrow().total()
    }

    pub fn item_count(&self) -> u32 {
        self.state.borrow().item_count()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().is_empty()
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}
