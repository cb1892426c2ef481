//! Order history view-model.
//!
//! Orders are only ever fetched for a signed-in user. Without one, the view
//! settles on [`OrdersView::SignInRequired`] and the backend is never
//! called.

use tracing::{debug, error, instrument};

use sweet_delights_core::{Order, OrderDetailOverlay, OrderId};

use super::fetch::{FetchOutcome, FetchSequence, FetchTicket};
use super::scope::ViewScope;
use crate::api::{ApiError, OrderSource};
use crate::models::CurrentUser;

/// The order history page.
#[derive(Debug)]
pub enum OrdersView {
    /// No usable signed-in user.
    SignInRequired {
        /// The user was signed in but the backend rejected their token.
        expired: bool,
    },
    /// The signed-in user's orders.
    Ready(OrderHistory),
}

impl OrdersView {
    /// Build the view for `user`, fetching their orders if there is one.
    #[instrument(skip_all, fields(signed_in = user.is_some()))]
    pub async fn load<S: OrderSource>(
        user: Option<&CurrentUser>,
        source: &S,
        scope: &ViewScope,
    ) -> Self {
        let Some(user) = user else {
            return Self::SignInRequired { expired: false };
        };

        let mut history = OrderHistory::default();
        match history.refresh(user, source, scope).await {
            FetchOutcome::Failed { unauthorized: true } => Self::SignInRequired { expired: true },
            _ => Self::Ready(history),
        }
    }
}

/// A user's orders plus the detail overlay.
#[derive(Debug, Default)]
pub struct OrderHistory {
    pub orders: Vec<Order>,
    pub loading: bool,
    pub overlay: OrderDetailOverlay,
    sequence: FetchSequence,
}

impl OrderHistory {
    pub const fn begin_fetch(&mut self) -> FetchTicket {
        self.loading = true;
        self.sequence.issue()
    }

    /// Apply a fetch result if `ticket` is still the latest.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Order>, ApiError>,
    ) -> FetchOutcome {
        if !self.sequence.is_latest(ticket) {
            debug!(?ticket, "Discarding stale order response");
            return FetchOutcome::Stale;
        }

        self.loading = false;
        match result {
            Ok(orders) => {
                self.orders = orders;
                FetchOutcome::Applied
            }
            Err(e) => {
                error!("Failed to fetch orders: {e}");
                self.orders = Vec::new();
                self.overlay.dismiss();
                FetchOutcome::Failed {
                    unauthorized: matches!(e, ApiError::Unauthorized),
                }
            }
        }
    }

    /// Fetch the orders of `user`.
    pub async fn refresh<S: OrderSource>(
        &mut self,
        user: &CurrentUser,
        source: &S,
        scope: &ViewScope,
    ) -> FetchOutcome {
        if scope.is_cancelled() {
            return FetchOutcome::Cancelled;
        }

        let ticket = self.begin_fetch();
        match scope.run(source.orders(&user.token)).await {
            Some(result) => self.complete_fetch(ticket, result),
            None => {
                self.loading = false;
                FetchOutcome::Cancelled
            }
        }
    }

    /// Open the overlay on `id` if it is one of the listed orders.
    ///
    /// Returns whether the overlay opened.
    pub fn select(&mut self, id: &OrderId) -> bool {
        if self.orders.iter().any(|order| order.id == *id) {
            self.overlay.select(id.clone());
            true
        } else {
            false
        }
    }

    pub fn dismiss(&mut self) {
        self.overlay.dismiss();
    }

    /// The order shown in the overlay, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Order> {
        let id = self.overlay.open_order()?;
        self.orders.iter().find(|order| order.id == *id)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use sweet_delights_core::UserId;

    use super::*;
    use crate::models::AccessToken;
    use crate::views::test_support::{FakeOrders, StalledOrders, order};

    fn user() -> CurrentUser {
        CurrentUser {
            id: UserId::new("u-42"),
            name: "Meera".to_string(),
            email: "meera@example.com".to_string(),
            token: AccessToken::new("token-42"),
        }
    }

    #[tokio::test]
    async fn test_no_user_means_no_backend_call() {
        let source = FakeOrders::ok(vec![order("o1", "pending")]);
        let (scope, _guard) = ViewScope::new();

        let view = OrdersView::load(None, &source, &scope).await;

        assert!(matches!(view, OrdersView::SignInRequired { expired: false }));
        assert_eq!(source.call_count(), 0);
    }

    #[tokio::test]
    async fn test_signed_in_user_gets_orders() {
        let source = FakeOrders::ok(vec![order("o1", "pending"), order("o2", "delivered")]);
        let (scope, _guard) = ViewScope::new();

        let view = OrdersView::load(Some(&user()), &source, &scope).await;

        let OrdersView::Ready(history) = view else {
            panic!("expected order history");
        };
        assert_eq!(history.orders.len(), 2);
        assert!(!history.loading);
        assert!(!history.overlay.is_open());
        assert_eq!(source.call_count(), 1);
    }

    #[tokio::test]
    async fn test_rejected_token_asks_to_sign_in_again() {
        let source = FakeOrders::with(Err(ApiError::Unauthorized));
        let (scope, _guard) = ViewScope::new();

        let view = OrdersView::load(Some(&user()), &source, &scope).await;

        assert!(matches!(view, OrdersView::SignInRequired { expired: true }));
    }

    #[tokio::test]
    async fn test_backend_failure_renders_empty_history() {
        let source = FakeOrders::with(Err(ApiError::Status {
            status: 500,
            body: String::new(),
        }));
        let (scope, _guard) = ViewScope::new();

        let view = OrdersView::load(Some(&user()), &source, &scope).await;

        let OrdersView::Ready(history) = view else {
            panic!("expected order history");
        };
        assert!(history.orders.is_empty());
        assert!(!history.loading);
    }

    #[test]
    fn test_select_replaces_and_dismiss_closes() {
        let mut history = OrderHistory::default();
        let ticket = history.begin_fetch();
        history.complete_fetch(ticket, Ok(vec![order("order-a", "pending"), order("order-b", "confirmed")]));

        assert!(history.select(&OrderId::new("order-a")));
        assert!(history.select(&OrderId::new("order-b")));
        assert_eq!(history.selected().map(|o| o.id.as_str()), Some("order-b"));

        history.dismiss();
        assert!(history.selected().is_none());
    }

    #[test]
    fn test_select_unknown_order_keeps_overlay_closed() {
        let mut history = OrderHistory::default();
        let ticket = history.begin_fetch();
        history.complete_fetch(ticket, Ok(vec![order("order-a", "pending")]));

        assert!(!history.select(&OrderId::new("missing")));
        assert!(!history.overlay.is_open());
    }

    #[tokio::test]
    async fn test_cancel_during_fetch_clears_loading() {
        let (scope, guard) = ViewScope::new();
        let mut history = OrderHistory::default();

        let handle = tokio::spawn(async move {
            let outcome = history.refresh(&user(), &StalledOrders, &scope).await;
            (outcome, history)
        });
        tokio::task::yield_now().await;
        drop(guard);

        let joined = tokio::time::timeout(Duration::from_secs(5), handle).await;
        let Ok(Ok((outcome, history))) = joined else {
            panic!("refresh did not observe cancellation");
        };
        assert_eq!(outcome, FetchOutcome::Cancelled);
        assert!(!history.loading);
    }
}
