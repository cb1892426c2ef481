//! Catalog filtering.
//!
//! - [`filter`] - the filter tuple and its URL and query projections
//! - [`params`] - ordered page URL parameters
//! - [`query`] - the canonical backend query

pub mod filter;
pub mod params;
pub mod query;

pub use filter::{
    CATEGORIES, Category, FilterState, PRICE_CEILING, PRICE_FLOOR, PRICE_STEP, PriceRange,
    RATING_OPTIONS, SortKey, UnknownSortKey,
};
pub use params::SearchParams;
pub use query::{ProductQuery, keys};
