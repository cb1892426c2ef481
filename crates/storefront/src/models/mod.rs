//! Domain models for storefront.
//!
//! Product and order records come from `sweet_delights_core`; this module
//! only holds what the storefront keeps in the session.

pub mod session;

pub use session::{AccessToken, CurrentUser, keys as session_keys};
