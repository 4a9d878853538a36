//! # Progress
//!
//! Which overlay the storefront is showing.

use serde::{Deserialize, Serialize};

/// Storefront overlay state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Progress {
    /// No overlay, the catalog is visible
    #[default]
    Browsing,
    /// Cart overlay open
    Cart,
    /// Checkout overlay open
    Checkout,
}

impl Progress {
    /// Close `overlay` if it is the one showing.
    ///
    /// Returns the state unchanged when a different overlay is open, so a
    /// late "close cart" cannot dismiss checkout.
    pub fn hiding(self, overlay: Progress) -> Progress {
        if self == overlay {
            Progress::Browsing
        } else {
            self
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Progress::Browsing => "browsing",
            Progress::Cart => "cart",
            Progress::Checkout => "checkout",
        }
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hiding_current_overlay() {
        assert_eq!(Progress::Cart.hiding(Progress::Cart), Progress::Browsing);
        assert_eq!(Progress::Checkout.hiding(Progress::Checkout), Progress::Browsing);
    }

    #[test]
    fn test_hiding_other_overlay_is_noop() {
        assert_eq!(Progress::Checkout.hiding(Progress::Cart), Progress::Checkout);
        assert_eq!(Progress::Browsing.hiding(Progress::Cart), Progress::Browsing);
    }
}
