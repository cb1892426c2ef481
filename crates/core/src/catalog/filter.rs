//! Catalog filter state and its two projections: the backend query and the
//! page URL.
//!
//! Both projections use the same keys and the same omission rule (a field at
//! its default is left out), so the page URL of a filtered view is exactly
//! `/products?` plus the backend query. Reading state back from a URL is
//! lenient: anything unparsable falls back to that field's default.

use core::fmt;
use core::str::FromStr;

use thiserror::Error;

use super::params::SearchParams;
use super::query::{ProductQuery, keys};
use crate::types::MAX_RATING;

/// Lowest selectable price.
pub const PRICE_FLOOR: u32 = 0;
/// Highest selectable price; also the default upper bound.
pub const PRICE_CEILING: u32 = 2000;
/// Step of the price slider.
pub const PRICE_STEP: u32 = 50;
/// Minimum-rating choices offered in the sidebar, highest first.
pub const RATING_OPTIONS: [u8; 5] = [4, 3, 2, 1, 0];

/// Category filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Category {
    /// No category restriction (`all`).
    #[default]
    All,
    /// Only products tagged with this category.
    Named(String),
}

impl Category {
    /// Wire value of the "no restriction" category.
    pub const ALL: &'static str = "all";

    /// Parse a category value; blank and `all` mean no restriction.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(Self::ALL) {
            Self::All
        } else {
            Self::Named(value.to_owned())
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => Self::ALL,
            Self::Named(name) => name,
        }
    }

    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Categories listed in the sidebar, with their labels.
pub const CATEGORIES: [(&str, &str); 6] = [
    ("all", "All Cakes"),
    ("chocolate", "Chocolate"),
    ("vanilla", "Vanilla"),
    ("red-velvet", "Red Velvet"),
    ("fruit", "Fruit Cakes"),
    ("butterscotch", "Butterscotch"),
];

/// Inclusive price bounds, in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PriceRange {
    pub min: u32,
    pub max: u32,
}

impl PriceRange {
    /// Build a range clamped to `PRICE_FLOOR..=PRICE_CEILING`, swapping the
    /// bounds if they arrive reversed.
    #[must_use]
    pub fn new(min: u32, max: u32) -> Self {
        let min = min.clamp(PRICE_FLOOR, PRICE_CEILING);
        let max = max.clamp(PRICE_FLOOR, PRICE_CEILING);
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: PRICE_FLOOR,
            max: PRICE_CEILING,
        }
    }
}

/// Sort order of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    Newest,
    PriceLow,
    PriceHigh,
    Rating,
}

impl SortKey {
    /// Every sort key, in the order the dropdown lists them.
    pub const ALL: [Self; 4] = [Self::Newest, Self::PriceLow, Self::PriceHigh, Self::Rating];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Rating => "rating",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest First",
            Self::PriceLow => "Price: Low to High",
            Self::PriceHigh => "Price: High to Low",
            Self::Rating => "Highest Rated",
        }
    }
}

/// Error parsing a [`SortKey`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownSortKey(s.to_owned()))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The catalog's filter tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FilterState {
    pub category: Category,
    pub price_range: PriceRange,
    /// Minimum average rating, 0 to 5; 0 disables the filter.
    pub min_rating: u8,
    pub sort: SortKey,
}

impl FilterState {
    /// State with only a sort key set.
    #[must_use]
    pub fn sorted_by(sort: SortKey) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Read filter state from page URL parameters.
    ///
    /// Missing, blank or malformed values fall back to their defaults.
    #[must_use]
    pub fn from_params(params: &SearchParams) -> Self {
        let category = params
            .get(keys::CATEGORY)
            .map_or(Category::All, Category::parse);
        let min = parse_number(params.get(keys::MIN_PRICE)).unwrap_or(PRICE_FLOOR);
        let max = parse_number(params.get(keys::MAX_PRICE)).unwrap_or(PRICE_CEILING);
        let min_rating = parse_number(params.get(keys::RATING))
            .map_or(0, |rating| rating.min(u32::from(MAX_RATING)));
        #[allow(clippy::cast_possible_truncation)] // clamped to MAX_RATING
        let min_rating = min_rating as u8;
        let sort = params
            .get(keys::SORT)
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();

        Self {
            category,
            price_range: PriceRange::new(min, max),
            min_rating,
            sort,
        }
    }

    /// Build the backend query, omitting every field at its default.
    #[must_use]
    pub fn to_query(&self) -> ProductQuery {
        let mut query = ProductQuery::default();
        for (key, value) in self.non_default_pairs() {
            query.push(key, value);
        }
        query
    }

    /// Write the state into page URL parameters: non-default fields are set,
    /// default fields are deleted, other keys are left untouched.
    pub fn sync_to_params(&self, params: &mut SearchParams) {
        let pairs = self.non_default_pairs();
        for key in keys::ALL {
            match pairs.iter().find(|(k, _)| *k == key) {
                Some((_, value)) => params.set(key, value.clone()),
                None => params.delete(key),
            }
        }
    }

    /// Change the category and mirror the new state into the URL.
    pub fn select_category(&mut self, category: Category, params: &mut SearchParams) {
        self.category = category;
        self.sync_to_params(params);
    }

    /// Change the price range and mirror the new state into the URL.
    pub fn set_price_range(&mut self, range: PriceRange, params: &mut SearchParams) {
        self.price_range = range;
        self.sync_to_params(params);
    }

    /// Change the minimum rating and mirror the new state into the URL.
    pub fn set_min_rating(&mut self, rating: u8, params: &mut SearchParams) {
        self.min_rating = rating.min(MAX_RATING);
        self.sync_to_params(params);
    }

    /// Change the sort key and mirror the new state into the URL.
    pub fn set_sort(&mut self, sort: SortKey, params: &mut SearchParams) {
        self.sort = sort;
        self.sync_to_params(params);
    }

    /// Reset every field to its default and remove every filter key from the
    /// URL in the same step.
    pub fn clear(&mut self, params: &mut SearchParams) {
        *self = Self::default();
        for key in keys::ALL {
            params.delete(key);
        }
    }

    fn non_default_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(keys::ALL.len());
        if let Category::Named(name) = &self.category {
            pairs.push((keys::CATEGORY, name.clone()));
        }
        if self.price_range.min > PRICE_FLOOR {
            pairs.push((keys::MIN_PRICE, self.price_range.min.to_string()));
        }
        if self.price_range.max < PRICE_CEILING {
            pairs.push((keys::MAX_PRICE, self.price_range.max.to_string()));
        }
        if self.min_rating > 0 {
            pairs.push((keys::RATING, self.min_rating.to_string()));
        }
        if self.sort != SortKey::Newest {
            pairs.push((keys::SORT, self.sort.as_str().to_owned()));
        }
        pairs
    }
}

fn parse_number(value: Option<&str>) -> Option<u32> {
    value.and_then(|v| v.trim().parse::<u32>().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_yields_empty_query() {
        let query = FilterState::default().to_query();
        assert!(query.is_empty());
        assert_eq!(query.to_query_string(), "");
    }

    #[test]
    fn each_non_default_field_adds_exactly_its_parameter() {
        let cases = [
            (
                FilterState {
                    category: Category::parse("chocolate"),
                    ..FilterState::default()
                },
                "category=chocolate",
            ),
            (
                FilterState {
                    price_range: PriceRange::new(500, PRICE_CEILING),
                    ..FilterState::default()
                },
                "minPrice=500",
            ),
            (
                FilterState {
                    price_range: PriceRange::new(PRICE_FLOOR, 1200),
                    ..FilterState::default()
                },
                "maxPrice=1200",
            ),
            (
                FilterState {
                    min_rating: 3,
                    ..FilterState::default()
                },
                "rating=3",
            ),
            (FilterState::sorted_by(SortKey::PriceHigh), "sort=price-high"),
        ];

        for (state, expected) in cases {
            assert_eq!(state.to_query().to_query_string(), expected, "{state:?}");
        }
    }

    #[test]
    fn every_field_set_uses_canonical_order() {
        let state = FilterState {
            category: Category::parse("red-velvet"),
            price_range: PriceRange::new(100, 1500),
            min_rating: 4,
            sort: SortKey::Rating,
        };
        assert_eq!(
            state.to_query().to_query_string(),
            "category=red-velvet&minPrice=100&maxPrice=1500&rating=4&sort=rating"
        );
    }

    #[test]
    fn all_category_is_the_default() {
        assert_eq!(Category::parse("all"), Category::All);
        assert_eq!(Category::parse(" ALL "), Category::All);
        assert_eq!(Category::parse(""), Category::All);
        assert_eq!(Category::parse("fruit").as_str(), "fruit");
    }

    #[test]
    fn price_range_is_clamped_and_ordered() {
        assert_eq!(PriceRange::new(0, 5000), PriceRange::default());
        assert_eq!(PriceRange::new(1500, 300), PriceRange { min: 300, max: 1500 });
    }

    #[test]
    fn sort_key_parses_wire_values() {
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>(), Ok(key));
        }
        assert_eq!(
            "cheapest".parse::<SortKey>(),
            Err(UnknownSortKey("cheapest".to_owned()))
        );
    }

    #[test]
    fn from_params_reads_full_state() {
        let params = SearchParams::parse(
            "category=vanilla&minPrice=200&maxPrice=900&rating=2&sort=price-low&view=list",
        );
        let state = FilterState::from_params(&params);
        assert_eq!(state.category, Category::Named("vanilla".to_owned()));
        assert_eq!(state.price_range, PriceRange { min: 200, max: 900 });
        assert_eq!(state.min_rating, 2);
        assert_eq!(state.sort, SortKey::PriceLow);
    }

    #[test]
    fn from_params_falls_back_on_garbage() {
        let params = SearchParams::parse("minPrice=cheap&maxPrice=-4&rating=9&sort=random");
        let state = FilterState::from_params(&params);
        assert_eq!(state.price_range, PriceRange::default());
        assert_eq!(state.min_rating, MAX_RATING);
        assert_eq!(state.sort, SortKey::Newest);
    }

    #[test]
    fn url_round_trip_preserves_state() {
        let state = FilterState {
            category: Category::parse("fruit"),
            price_range: PriceRange::new(50, 1850),
            min_rating: 1,
            sort: SortKey::PriceHigh,
        };
        let mut params = SearchParams::new();
        state.sync_to_params(&mut params);
        assert_eq!(FilterState::from_params(&params), state);
        assert_eq!(params.to_query_string(), state.to_query().to_query_string());
    }

    #[test]
    fn select_category_writes_or_deletes_the_key() {
        let mut params = SearchParams::parse("view=list");
        let mut state = FilterState::default();

        state.select_category(Category::parse("chocolate"), &mut params);
        assert_eq!(params.get(keys::CATEGORY), Some("chocolate"));
        assert_eq!(params.get("view"), Some("list"));

        state.select_category(Category::All, &mut params);
        assert!(!params.contains(keys::CATEGORY));
        assert_eq!(params.to_query_string(), "view=list");
    }

    #[test]
    fn setters_mirror_every_field_into_the_url() {
        let mut params = SearchParams::new();
        let mut state = FilterState::default();

        state.set_price_range(PriceRange::new(0, 1000), &mut params);
        state.set_min_rating(3, &mut params);
        state.set_sort(SortKey::Rating, &mut params);
        assert_eq!(params.to_query_string(), "maxPrice=1000&rating=3&sort=rating");

        state.set_sort(SortKey::Newest, &mut params);
        assert!(!params.contains(keys::SORT));
    }

    #[test]
    fn clear_restores_defaults_and_strips_filter_keys() {
        let starting_points = [
            "category=chocolate",
            "category=fruit&minPrice=100&maxPrice=800&rating=4&sort=rating&view=list",
            "",
            "category=all&sort=newest",
        ];

        for raw in starting_points {
            let mut params = SearchParams::parse(raw);
            let mut state = FilterState::from_params(&params);
            state.clear(&mut params);

            assert!(state.is_default(), "{raw}");
            assert!(!params.contains(keys::CATEGORY), "{raw}");
            for key in keys::ALL {
                assert!(!params.contains(key), "{raw}: {key}");
            }
        }
    }

    #[test]
    fn clear_keeps_non_filter_keys() {
        let mut params = SearchParams::parse("category=chocolate&view=list");
        let mut state = FilterState::from_params(&params);
        state.clear(&mut params);
        assert_eq!(params.href("/products"), "/products?view=list");
    }
}
