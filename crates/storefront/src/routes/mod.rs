//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (backend reachable)
//!
//! # Catalog
//! GET  /products               - Product catalog (full filter state in query)
//! GET  /products/clear         - Reset filters, keep view mode
//!
//! # Orders
//! GET  /orders                 - Order history (?order=<id> opens the overlay)
//!
//! # Cart (HTMX fragments)
//! POST /cart/add               - Add to cart (returns count, triggers cart-updated)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Anything else
//! *    <unmatched>             - 404 Not Found
//! ```

pub mod cart;
pub mod home;
pub mod orders;
pub mod products;

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    routing::{get, post},
};

use sweet_delights_core::catalog::ProductQuery;

use crate::error::AppError;
use crate::state::AppState;

/// Whether the request came from HTMX.
#[must_use]
pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get("HX-Request")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/clear", get(products::clear))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/count", get(cart::count))
}

/// Create the health check router.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health))
        .route("/ready", get(readiness))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Health checks
        .nest("/health", health_routes())
        // Catalog
        .nest("/products", product_routes())
        // Orders
        .route("/orders", get(orders::index))
        // Cart fragments
        .nest("/cart", cart_routes())
}

/// Plain 404 for paths no route matches.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Sends the default product query straight to the backend, bypassing the
/// cache, and returns 503 Service Unavailable if it cannot answer.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.api().fetch_products(&ProductQuery::default()).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!("Readiness check failed: {e}");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
