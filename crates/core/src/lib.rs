//! Sweet Delights Core - Shared types and catalog logic.
//!
//! This crate holds what the storefront knows about cakes and orders
//! without touching the network:
//! - the product and order records returned by the backend
//! - catalog filter state, its backend query and its page URL form
//! - how order and payment statuses are presented
//! - the order detail overlay
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no templates. The storefront depends on it; tests can use it
//! without a runtime.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, statuses, products and orders
//! - [`catalog`] - Filter state, URL parameters and product queries
//! - [`presentation`] - Status icons and colours
//! - [`overlay`] - Order detail overlay state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod overlay;
pub mod presentation;
pub mod types;

pub use overlay::OrderDetailOverlay;
pub use presentation::{StatusIcon, StatusStyle, capitalize};
pub use types::*;
