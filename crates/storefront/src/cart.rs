//! Session-backed cart.
//!
//! The storefront only collects items; checkout belongs to another service.
//! Handlers and tests talk to the cart through [`CartSink`].

use std::future::Future;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use sweet_delights_core::ProductId;

use crate::error::{AppError, Result};
use crate::models::session_keys;

/// An item being added to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: String,
}

impl CartItem {
    /// Check the item before it reaches the session.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for a blank id or name, or a negative
    /// price.
    pub fn validate(&self) -> Result<()> {
        if self.product_id.as_str().trim().is_empty() {
            return Err(AppError::BadRequest("missing product id".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("missing product name".to_string()));
        }
        if self.price.is_sign_negative() {
            return Err(AppError::BadRequest("price cannot be negative".to_string()));
        }
        Ok(())
    }
}

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub item: CartItem,
    pub quantity: u32,
}

/// Where add-to-cart requests go.
pub trait CartSink: Send + Sync {
    /// Add one unit of `item`; returns the new total quantity.
    fn add(&self, item: CartItem) -> impl Future<Output = Result<u32>> + Send;

    /// Total quantity across all lines.
    fn count(&self) -> impl Future<Output = u32> + Send;
}

/// Cart stored in the visitor's session.
#[derive(Debug, Clone)]
pub struct SessionCart {
    session: Session,
}

impl SessionCart {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// Current cart lines; an unreadable cart counts as empty.
    pub async fn lines(&self) -> Vec<CartLine> {
        match self.session.get::<Vec<CartLine>>(session_keys::CART).await {
            Ok(lines) => lines.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("Failed to read cart from session: {e}");
                Vec::new()
            }
        }
    }
}

impl CartSink for SessionCart {
    async fn add(&self, item: CartItem) -> Result<u32> {
        item.validate()?;

        let mut lines = self.lines().await;
        match lines
            .iter_mut()
            .find(|line| line.item.product_id == item.product_id)
        {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => lines.push(CartLine { item, quantity: 1 }),
        }

        self.session.insert(session_keys::CART, &lines).await?;
        Ok(total_quantity(&lines))
    }

    async fn count(&self) -> u32 {
        total_quantity(&self.lines().await)
    }
}

fn total_quantity(lines: &[CartLine]) -> u32 {
    lines
        .iter()
        .fold(0, |total, line| total.saturating_add(line.quantity))
}
