//! Order records as returned by `GET /orders`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{OrderId, ProductId};
use super::price::Price;
use super::status::{OrderStatus, PaymentStatus};

/// A customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    pub total_amount: Decimal,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    pub order_date: DateTime<Utc>,
    #[serde(default)]
    pub delivery_date: Option<DateTime<Utc>>,
    pub delivery_address: DeliveryAddress,
}

impl Order {
    #[must_use]
    pub fn total(&self) -> Price {
        Price::store(self.total_amount)
    }
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product: ProductSnapshot,
    pub quantity: u32,
    /// Unit price at the time of ordering.
    pub price: Decimal,
}

impl OrderItem {
    #[must_use]
    pub fn unit_price(&self) -> Price {
        Price::store(self.price)
    }

    /// `price × quantity`, or `None` if the product does not fit a `Decimal`.
    #[must_use]
    pub fn line_total(&self) -> Option<Price> {
        self.price
            .checked_mul(Decimal::from(self.quantity))
            .map(Price::store)
    }
}

/// The product as it was when the order was placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub image: String,
}

/// Where the order is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "pincode")]
    pub postal_code: String,
}
