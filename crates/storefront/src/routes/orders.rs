//! Order history route handler.
//!
//! `?order=<id>` opens the detail overlay for one listed order; the close
//! link points back at plain `/orders`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use sweet_delights_core::{Order, OrderId, OrderItem, capitalize};

use crate::error::set_sentry_user;
use crate::filters;
use crate::middleware::{OptionalAuth, clear_current_user};
use crate::state::AppState;
use crate::views::{OrderHistory, OrdersView, ViewScope};

/// Order line display data for templates.
#[derive(Clone)]
pub struct OrderItemView {
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: Option<String>,
}

impl From<&OrderItem> for OrderItemView {
    fn from(item: &OrderItem) -> Self {
        Self {
            name: item.product.name.clone(),
            image: item.product.image.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price().display(),
            line_total: item.line_total().map(|p| p.display()),
        }
    }
}

/// Order display data for templates.
#[derive(Clone)]
pub struct OrderView {
    pub id: String,
    pub short_code: String,
    pub placed_on: String,
    pub placed_at: String,
    pub delivered_on: Option<String>,
    pub total: String,
    pub status_label: String,
    pub status_icon: &'static str,
    pub status_icon_class: &'static str,
    pub status_badge_class: &'static str,
    pub payment_label: String,
    pub payment_icon: &'static str,
    pub payment_icon_class: &'static str,
    pub payment_text_class: &'static str,
    pub items: Vec<OrderItemView>,
    pub address: String,
    pub detail_href: String,
}

fn date(at: &DateTime<Utc>) -> String {
    at.format("%-d %b %Y").to_string()
}

fn date_time(at: &DateTime<Utc>) -> String {
    at.format("%-d %b %Y, %-I:%M %p").to_string()
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        let status = order.status.style();
        let payment = order.payment_status.style();
        let address = &order.delivery_address;

        Self {
            id: order.id.to_string(),
            short_code: order.id.short_code().to_string(),
            placed_on: date(&order.order_date),
            placed_at: date_time(&order.order_date),
            delivered_on: order.delivery_date.as_ref().map(date),
            total: order.total().display(),
            status_label: capitalize(order.status.as_str()),
            status_icon: status.icon.name(),
            status_icon_class: status.icon_class,
            status_badge_class: status.badge_class,
            payment_label: capitalize(order.payment_status.as_str()),
            payment_icon: payment.icon.name(),
            payment_icon_class: payment.icon_class,
            payment_text_class: payment.text_class,
            items: order.items.iter().map(OrderItemView::from).collect(),
            address: format!(
                "{}, {}, {} - {}",
                address.street, address.city, address.state, address.postal_code
            ),
            detail_href: format!("/orders?order={}", order.id),
        }
    }
}

/// Order page query parameters.
#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    /// Order to show in the detail overlay.
    pub order: Option<String>,
}

/// Order history page template.
#[derive(Template, WebTemplate)]
#[template(path = "orders/index.html")]
pub struct OrdersIndexTemplate {
    pub signed_in: bool,
    /// The session was signed in but the backend rejected it.
    pub session_expired: bool,
    pub login_url: String,
    pub orders: Vec<OrderView>,
    pub selected: Option<OrderView>,
}

impl OrdersIndexTemplate {
    fn sign_in(login_url: &str, session_expired: bool) -> Self {
        Self {
            signed_in: false,
            session_expired,
            login_url: login_url.to_string(),
            orders: Vec::new(),
            selected: None,
        }
    }

    fn history(login_url: &str, history: &OrderHistory) -> Self {
        Self {
            signed_in: true,
            session_expired: false,
            login_url: login_url.to_string(),
            orders: history.orders.iter().map(OrderView::from).collect(),
            selected: history.selected().map(OrderView::from),
        }
    }
}

/// Display the signed-in user's order history.
#[instrument(skip(state, user, session))]
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    session: Session,
    Query(query): Query<OrdersQuery>,
) -> impl IntoResponse {
    if let Some(user) = &user {
        set_sentry_user(user);
    }

    let login_url = &state.config().login_url;
    let (scope, _guard) = ViewScope::new();

    match OrdersView::load(user.as_ref(), state.api(), &scope).await {
        OrdersView::SignInRequired { expired } => {
            if expired && let Err(e) = clear_current_user(&session).await {
                tracing::error!("Failed to clear expired user from session: {e}");
            }
            OrdersIndexTemplate::sign_in(login_url, expired)
        }
        OrdersView::Ready(mut history) => {
            if let Some(id) = query.order.filter(|id| !id.is_empty()) {
                let id = OrderId::new(id);
                if !history.select(&id) {
                    tracing::debug!(order_id = %id, "Requested order is not in the history");
                }
            }
            OrdersIndexTemplate::history(login_url, &history)
        }
    }
}
