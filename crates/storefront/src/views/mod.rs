//! View-models for the storefront pages.
//!
//! Each page builds its view-model per request, fetches through a
//! [`ProductSource`](crate::api::ProductSource) or
//! [`OrderSource`](crate::api::OrderSource), and hands the result to a
//! template. Fetch failures never escape: they are logged and the view
//! renders empty.

pub mod catalog;
pub mod fetch;
pub mod home;
pub mod orders;
pub mod scope;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::CatalogView;
pub use fetch::{FetchOutcome, FetchSequence, FetchTicket};
pub use home::{FEATURED_COUNT, HomeView};
pub use orders::{OrderHistory, OrdersView};
pub use scope::{ScopeGuard, ViewScope};
