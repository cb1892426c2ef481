//! Product catalog view-model.
//!
//! Holds the filter state and the products matching it. Every refresh
//! takes a new ticket, so when filter changes race, only the response for
//! the latest state lands.

use tracing::{debug, error, instrument};

use sweet_delights_core::Product;
use sweet_delights_core::catalog::FilterState;

use super::fetch::{FetchOutcome, FetchSequence, FetchTicket};
use super::scope::ViewScope;
use crate::api::{ApiError, ProductSource};

#[derive(Debug, Default)]
pub struct CatalogView {
    pub filter: FilterState,
    pub products: Vec<Product>,
    pub loading: bool,
    sequence: FetchSequence,
}

impl CatalogView {
    #[must_use]
    pub fn new(filter: FilterState) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub const fn begin_fetch(&mut self) -> FetchTicket {
        self.loading = true;
        self.sequence.issue()
    }

    /// Apply a fetch result if `ticket` is still the latest.
    ///
    /// Success replaces the product list wholesale; failure clears it.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Product>, ApiError>,
    ) -> FetchOutcome {
        if !self.sequence.is_latest(ticket) {
            debug!(?ticket, "Discarding stale catalog response");
            return FetchOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(products) => {
                self.products = products;
                FetchOutcome::Applied
            }
            Err(e) => {
                error!("Failed to fetch products: {e}");
                self.products = Vec::new();
                FetchOutcome::Failed {
                    unauthorized: matches!(e, ApiError::Unauthorized),
                }
            }
        }
    }

    /// Query the backend for the current filter state.
    #[instrument(skip_all, fields(query = %self.filter.to_query().to_query_string()))]
    pub async fn refresh<S: ProductSource>(
        &mut self,
        source: &S,
        scope: &ViewScope,
    ) -> FetchOutcome {
        if scope.is_cancelled() {
            return FetchOutcome::Cancelled;
        }

        let ticket = self.begin_fetch();
        let query = self.filter.to_query();
        match scope.run(source.products(&query)).await {
            Some(result) => self.complete_fetch(ticket, result),
            None => {
                self.loading = false;
                FetchOutcome::Cancelled
            }
        }
    }

    /// The "N cakes found" line.
    #[must_use]
    pub fn result_count_label(&self) -> String {
        format!("{} cakes found", self.products.len())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use sweet_delights_core::catalog::{Category, SearchParams, SortKey};

    use super::*;
    use crate::views::test_support::{FakeProducts, StalledProducts, cake, unreachable_client};

    #[tokio::test]
    async fn test_refresh_sends_canonical_query() {
        let source = FakeProducts::ok(vec![cake("a", 4.0)]);
        let (scope, _guard) = ViewScope::new();
        let params = SearchParams::parse("category=chocolate&sort=price-low&view=list");

        let mut view = CatalogView::new(FilterState::from_params(&params));
        let outcome = view.refresh(&source, &scope).await;

        assert_eq!(outcome, FetchOutcome::Applied);
        assert_eq!(
            source.recorded_queries(),
            ["category=chocolate&sort=price-low"]
        );
        assert_eq!(view.products.len(), 1);
    }

    #[tokio::test]
    async fn test_network_failure_ends_empty_and_not_loading() {
        let source = FakeProducts::failing();
        let (scope, _guard) = ViewScope::new();

        let mut view = CatalogView::default();
        view.products = vec![cake("old", 3.0)];
        let outcome = view.refresh(&source, &scope).await;

        assert!(matches!(outcome, FetchOutcome::Failed { .. }));
        assert!(view.products.is_empty());
        assert!(!view.loading);
    }

    #[tokio::test]
    async fn test_refused_connection_ends_empty_and_not_loading() {
        let client = unreachable_client();
        let (scope, _guard) = ViewScope::new();

        let mut view = CatalogView::default();
        view.products = vec![cake("old", 3.0)];
        let outcome = view.refresh(&client, &scope).await;

        assert_eq!(outcome, FetchOutcome::Failed { unauthorized: false });
        assert!(view.products.is_empty());
        assert!(!view.loading);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut view = CatalogView::default();

        let first = view.begin_fetch();
        view.filter.select_category(Category::parse("vanilla"), &mut SearchParams::new());
        let second = view.begin_fetch();

        assert_eq!(
            view.complete_fetch(second, Ok(vec![cake("vanilla-1", 4.0)])),
            FetchOutcome::Applied
        );
        assert_eq!(
            view.complete_fetch(first, Ok(vec![cake("chocolate-1", 4.0)])),
            FetchOutcome::Stale
        );

        let ids: Vec<&str> = view.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["vanilla-1"]);
    }

    #[test]
    fn test_stale_failure_does_not_clear_results() {
        let mut view = CatalogView::default();
        let first = view.begin_fetch();
        let second = view.begin_fetch();
        view.complete_fetch(second, Ok(vec![cake("a", 4.0)]));

        let stale = Err(ApiError::Parse("bad body".to_string()));
        assert_eq!(view.complete_fetch(first, stale), FetchOutcome::Stale);
        assert_eq!(view.products.len(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_scope_leaves_view_untouched() {
        let (scope, guard) = ViewScope::new();
        drop(guard);

        let mut view = CatalogView::new(FilterState::sorted_by(SortKey::Rating));
        view.products = vec![cake("kept", 4.0)];
        let outcome = view.refresh(&FakeProducts::ok(Vec::new()), &scope).await;

        assert_eq!(outcome, FetchOutcome::Cancelled);
        assert_eq!(view.products.len(), 1);
        assert!(!view.loading);
    }

    #[tokio::test]
    async fn test_cancel_during_fetch_keeps_products() {
        let (scope, guard) = ViewScope::new();
        let mut view = CatalogView::default();
        view.products = vec![cake("kept", 4.0)];

        let handle = tokio::spawn(async move {
            let outcome = view.refresh(&StalledProducts, &scope).await;
            (outcome, view)
        });
        tokio::task::yield_now().await;
        drop(guard);

        let joined = tokio::time::timeout(Duration::from_secs(5), handle).await;
        let Ok(Ok((outcome, view))) = joined else {
            panic!("refresh did not observe cancellation");
        };
        assert_eq!(outcome, FetchOutcome::Cancelled);
        assert_eq!(view.products.len(), 1);
        assert!(!view.loading);
    }

    #[test]
    fn test_result_count_label() {
        let mut view = CatalogView::default();
        assert_eq!(view.result_count_label(), "0 cakes found");
        view.products = vec![cake("a", 1.0), cake("b", 2.0)];
        assert_eq!(view.result_count_label(), "2 cakes found");
    }
}
