//! Cart route handlers.
//!
//! Cart operations are HTMX fragments. Adding an item answers with the new
//! count badge and fires `cart-updated` so the header badge refreshes too.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    response::{AppendHeaders, IntoResponse},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::cart::{CartItem, CartSink, SessionCart};
use crate::error::{Result, add_breadcrumb};

/// HTMX event fired after the cart changes.
pub const CART_UPDATED_EVENT: &str = "cart-updated";

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Add one item to the cart (HTMX).
///
/// Form fields: `product_id`, `name`, `price`, `image`.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for an invalid item, or
/// `AppError::Session` if the cart cannot be saved.
#[instrument(skip(session))]
pub async fn add(session: Session, Form(item): Form<CartItem>) -> Result<impl IntoResponse> {
    let product_id = item.product_id.to_string();
    let count = SessionCart::new(session).add(item).await?;

    add_breadcrumb("cart", "Added to cart", &[("product_id", product_id.as_str())]);

    Ok((
        AppendHeaders([("HX-Trigger", CART_UPDATED_EVENT)]),
        CartCountTemplate { count },
    ))
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let count = SessionCart::new(session).count().await;
    CartCountTemplate { count }
}
