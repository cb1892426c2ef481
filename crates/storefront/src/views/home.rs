//! Home page view-model.

use tracing::{debug, error};

use sweet_delights_core::Product;
use sweet_delights_core::catalog::{FilterState, ProductQuery, SortKey};

use super::fetch::{FetchOutcome, FetchSequence, FetchTicket};
use super::scope::ViewScope;
use crate::api::{ApiError, ProductSource};

/// Number of featured products on the home page.
pub const FEATURED_COUNT: usize = 6;

/// Featured products: the highest rated, first six.
#[derive(Debug, Default)]
pub struct HomeView {
    pub featured: Vec<Product>,
    pub loading: bool,
    sequence: FetchSequence,
}

impl HomeView {
    /// The backend query behind the featured list.
    #[must_use]
    pub fn query() -> ProductQuery {
        FilterState::sorted_by(SortKey::Rating).to_query()
    }

    pub const fn begin_fetch(&mut self) -> FetchTicket {
        self.loading = true;
        self.sequence.issue()
    }

    /// Apply a fetch result, keeping at most [`FEATURED_COUNT`] products.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Product>, ApiError>,
    ) -> FetchOutcome {
        if !self.sequence.is_latest(ticket) {
            debug!(?ticket, "Discarding stale featured products");
            return FetchOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(mut products) => {
                products.truncate(FEATURED_COUNT);
                self.featured = products;
                FetchOutcome::Applied
            }
            Err(e) => {
                error!("Failed to fetch featured products: {e}");
                self.featured.clear();
                FetchOutcome::Failed {
                    unauthorized: matches!(e, ApiError::Unauthorized),
                }
            }
        }
    }

    /// Fetch the featured products.
    pub async fn refresh<S: ProductSource>(
        &mut self,
        source: &S,
        scope: &ViewScope,
    ) -> FetchOutcome {
        if scope.is_cancelled() {
            return FetchOutcome::Cancelled;
        }

        let ticket = self.begin_fetch();
        let query = Self::query();
        match scope.run(source.products(&query)).await {
            Some(result) => self.complete_fetch(ticket, result),
            None => {
                self.loading = false;
                FetchOutcome::Cancelled
            }
        }
    }
}
