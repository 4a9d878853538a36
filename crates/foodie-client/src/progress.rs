//! # User Progress
//!
//! Shared overlay state: which of catalog, cart or checkout is in front.

use foodie_core::Progress;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Shared progress handle
#[derive(Debug, Clone)]
pub struct UserProgress {
    state: Arc<watch::Sender<Progress>>,
}

impl UserProgress {
    pub fn new() -> Self {
        let (state, _) = watch::channel(Progress::Browsing);
        Self {
            state: Arc::new(state),
        }
    }

    pub fn progress(&self) -> Progress {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Progress> {
        self.state.subscribe()
    }

    pub fn show_cart(&self) {
        self.set(Progress::Cart);
    }

    pub fn hide_cart(&self) {
        self.hide(Progress::Cart);
    }

    pub fn show_checkout(&self) {
        self.set(Progress::Checkout);
    }

    pub fn hide_checkout(&self) {
        self.hide(Progress::Checkout);
    }

    fn set(&self, next: Progress) {
        self.transition(|_| next);
    }

    fn hide(&self, overlay: Progress) {
        self.transition(|current| current.hiding(overlay));
    }

    fn transition(&self, step: impl FnOnce(Progress) -> Progress) {
        self.state.send_if_modified(|current| {
            let next = step(*current);
            if *current == next {
                return false;
            }
            debug!(from = %current, to = %next, "progress");
            *current = next;
            true
        });
    }
}

impl Default for UserProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_to_checkout_and_back() {
        let progress = UserProgress::new();
        assert_eq!(progress.progress(), Progress::Browsing);

        progress.show_cart();
        assert_eq!(progress.progress(), Progress::Cart);

        progress.show_checkout();
        progress.hide_cart();
        assert_eq!(progress.progress(), Progress::Checkout);

        progress.hide_checkout();
        assert_eq!(progress.progress(), Progress::Browsing);
    }
}
