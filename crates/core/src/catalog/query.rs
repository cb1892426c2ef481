//! Backend query for `GET /products`.

use url::form_urlencoded;

/// Parameter names shared by the backend query and the catalog page URL.
pub mod keys {
    pub const CATEGORY: &str = "category";
    pub const MIN_PRICE: &str = "minPrice";
    pub const MAX_PRICE: &str = "maxPrice";
    pub const RATING: &str = "rating";
    pub const SORT: &str = "sort";

    /// Every filter key, in canonical order.
    pub const ALL: [&str; 5] = [CATEGORY, MIN_PRICE, MAX_PRICE, RATING, SORT];
}

/// A canonical product query.
///
/// Parameters appear in a fixed order and only when they differ from their
/// default, so two equal filter states always produce the same query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ProductQuery {
    pairs: Vec<(&'static str, String)>,
}

impl ProductQuery {
    pub(crate) fn push(&mut self, key: &'static str, value: impl Into<String>) {
        self.pairs.push((key, value.into()));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encode as `category=chocolate&sort=rating`; empty for the default
    /// query.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter().map(|(k, v)| (*k, v.as_str())))
            .finish()
    }
}
