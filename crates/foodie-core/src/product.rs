//! # Catalog Types
//!
//! Meal catalog types for the foodie storefront.
//! The live catalog comes from the meals endpoint; `MealCatalog::from_toml`
//! covers bundled fixtures.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::cart::CartItem;

/// Price in cents (single currency, USD).
///
/// On the wire a price is a decimal number in dollars (`12.99`). The meals
/// backend sends prices as decimal strings (`"12.99"`), which are accepted too.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    cents: i64,
}

impl Price {
    /// Zero dollars
    pub const ZERO: Price = Price { cents: 0 };

    /// Largest amount accepted from the wire, in dollars
    pub const MAX_AMOUNT: f64 = 1_000_000.0;

    /// Create a price from a decimal dollar amount
    pub fn new(amount: f64) -> Self {
        Self {
            cents: (amount * 100.0).round() as i64,
        }
    }

    /// Create a price from cents
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Amount in cents
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Amount in dollars
    pub fn as_decimal(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// Multiply by a quantity, saturating at the `i64` bounds
    pub fn times(&self, quantity: u32) -> Price {
        Price {
            cents: self.cents.saturating_mul(i64::from(quantity)),
        }
    }

    /// Format for display (e.g., "$10.00")
    pub fn display(&self) -> String {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        format!("{}${}.{:02}", sign, abs / 100, abs % 100)
    }

    fn parse_decimal(amount: f64) -> Option<Self> {
        if amount.is_finite() && (0.0..=Self::MAX_AMOUNT).contains(&amount) {
            Some(Self::new(amount))
        } else {
            None
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Self {
        Price {
            cents: iter.fold(0i64, |acc, p| acc.saturating_add(p.cents)),
        }
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PriceVisitor)
    }
}

struct PriceVisitor;

impl PriceVisitor {
    fn checked<E: de::Error>(amount: f64) -> Result<Price, E> {
        Price::parse_decimal(amount)
            .ok_or_else(|| E::custom(format!("invalid price amount: {}", amount)))
    }
}

impl<'de> Visitor<'de> for PriceVisitor {
    type Value = Price;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal price between 0 and 1000000 as a number or string")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Price, E> {
        Self::checked(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
        Self::checked(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
        Self::checked(v as f64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Price, E> {
        let amount: f64 = v
            .trim()
            .parse()
            .map_err(|_| E::custom(format!("invalid price string: {:?}", v)))?;
        Self::checked(amount)
    }
}

/// A meal in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    /// Unique meal identifier (e.g., "m1")
    pub id: String,

    /// Display name
    pub name: String,

    /// Unit price
    pub price: Price,

    /// Short description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Image path, relative to the backend's static root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Meal {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Price) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            description: None,
            image: None,
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Builder: set image path
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// The candidate entry handed to the cart when this meal is added
    pub fn to_cart_item(&self) -> CartItem {
        CartItem::new(self.id.clone(), self.name.clone(), self.price)
    }
}

/// Meal catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealCatalog {
    #[serde(default)]
    pub meals: Vec<Meal>,
}

impl MealCatalog {
    pub fn new() -> Self {
        Self { meals: Vec::new() }
    }

    /// Add a meal to the catalog
    pub fn add(&mut self, meal: Meal) {
        self.meals.push(meal);
    }

    /// Find a meal by ID
    pub fn get(&self, id: &str) -> Option<&Meal> {
        self.meals.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.meals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty()
    }

    /// Load catalog from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

impl From<Vec<Meal>> for MealCatalog {
    fn from(meals: Vec<Meal>) -> Self {
        Self { meals }
    }
}
