//! Core types for Sweet Delights.
//!
//! This module provides type-safe wrappers for the records the storefront
//! displays.

pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod status;

pub use id::*;
pub use order::{DeliveryAddress, Order, OrderItem, ProductSnapshot};
pub use price::Price;
pub use product::{BESTSELLER_TAG, MAX_RATING, Product};
pub use status::*;
