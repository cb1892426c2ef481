//! Product display records as returned by `GET /products`.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Tag that marks a product as a bestseller.
pub const BESTSELLER_TAG: &str = "bestseller";

/// Highest rating a product can have.
pub const MAX_RATING: u8 = 5;

/// A cake in the catalog.
///
/// Hydrated fresh from the backend on every fetch; nothing here is owned or
/// validated by the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    /// Pre-discount price, when the product is on offer.
    #[serde(default)]
    pub original_price: Option<Decimal>,
    /// Image URL.
    #[serde(default)]
    pub image: String,
    /// Average rating, 0 to 5.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default = "in_stock_by_default")]
    pub in_stock: bool,
}

const fn in_stock_by_default() -> bool {
    true
}

impl Product {
    /// Selling price.
    #[must_use]
    pub fn price(&self) -> Price {
        Price::store(self.price)
    }

    /// Original price, shown struck through next to the selling price.
    #[must_use]
    pub fn original_price(&self) -> Option<Price> {
        self.original_price.map(Price::store)
    }

    /// Amount saved against the original price.
    ///
    /// `None` unless the original price is strictly higher than the selling
    /// price.
    #[must_use]
    pub fn discount(&self) -> Option<Price> {
        self.original_price
            .filter(|original| *original > self.price)
            .and_then(|original| original.checked_sub(self.price))
            .map(Price::store)
    }

    #[must_use]
    pub fn is_bestseller(&self) -> bool {
        self.tags.contains(BESTSELLER_TAG)
    }

    /// Number of filled stars in a five-star row: `floor(rating)`, clamped.
    #[must_use]
    pub fn filled_stars(&self) -> u8 {
        if self.rating.is_nan() || self.rating <= 0.0 {
            return 0;
        }
        let floored = self.rating.floor().min(f64::from(MAX_RATING));
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=5
        let stars = floored as u8;
        stars
    }
}
