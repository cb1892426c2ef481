//! Integration tests for the order history page.

use axum::http::StatusCode;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use sweet_delights_integration_tests::{TestApp, body_text, order_json};

const FIRST_ORDER: &str = "665f1c2e9a7b3d0012ab34cd";
const SECOND_ORDER: &str = "665f1c2e9a7b3d0012ab99ef";

async fn mount_orders(app: &TestApp, token: &str, orders: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(orders))
        .mount(&app.backend)
        .await;
}

#[tokio::test]
async fn signed_out_visitor_sees_prompt_without_backend_call() {
    let app = TestApp::start().await;

    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&app.backend)
        .await;

    let response = app.get("/orders", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Please sign in to view your orders."));
    assert!(body.contains(r#"href="/login""#));
}

#[tokio::test]
async fn signed_in_user_sees_order_history() {
    let app = TestApp::start().await;
    mount_orders(
        &app,
        "tok-1",
        json!([
            order_json(FIRST_ORDER, "preparing"),
            order_json(SECOND_ORDER, "delivered")
        ]),
    )
    .await;

    let cookie = app.sign_in("tok-1").await;
    let response = app.get("/orders", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("Order #12ab34cd"));
    assert!(body.contains("Order #12ab99ef"));
    assert!(body.contains("Preparing"));
    assert!(body.contains("Delivered"));
    assert!(body.contains("Placed on 14 Feb 2026"));
    assert!(body.contains("12 MG Road, Pune, MH - 411001"));
    assert!(!body.contains("Order Details"));
}

#[tokio::test]
async fn order_query_opens_detail_overlay() {
    let app = TestApp::start().await;
    mount_orders(
        &app,
        "tok-1",
        json!([
            order_json(FIRST_ORDER, "pending"),
            order_json(SECOND_ORDER, "cancelled")
        ]),
    )
    .await;

    let cookie = app.sign_in("tok-1").await;
    let body = body_text(
        app.get(&format!("/orders?order={SECOND_ORDER}"), Some(&cookie))
            .await,
    )
    .await;

    assert!(body.contains("Order Details"));
    assert!(body.contains(&format!("<dd>{SECOND_ORDER}</dd>")));
    assert!(!body.contains(&format!("<dd>{FIRST_ORDER}</dd>")));
    assert!(body.contains("14 Feb 2026, 9:30 AM"));
}

#[tokio::test]
async fn unknown_order_query_leaves_overlay_closed() {
    let app = TestApp::start().await;
    mount_orders(&app, "tok-1", json!([order_json(FIRST_ORDER, "pending")])).await;

    let cookie = app.sign_in("tok-1").await;
    let body = body_text(app.get("/orders?order=not-mine", Some(&cookie)).await).await;

    assert!(body.contains("Order #12ab34cd"));
    assert!(!body.contains("Order Details"));
}

#[tokio::test]
async fn empty_history_offers_catalog_link() {
    let app = TestApp::start().await;
    mount_orders(&app, "tok-1", json!([])).await;

    let cookie = app.sign_in("tok-1").await;
    let body = body_text(app.get("/orders", Some(&cookie)).await).await;

    assert!(body.contains("Browse Cakes"));
}

#[tokio::test]
async fn rejected_token_signs_the_user_out() {
    let app = TestApp::start().await;

    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&app.backend)
        .await;

    let cookie = app.sign_in("expired").await;

    let body = body_text(app.get("/orders", Some(&cookie)).await).await;
    assert!(body.contains("Your session has expired"));

    // The stale user is gone, so the second visit makes no backend call
    let body = body_text(app.get("/orders", Some(&cookie)).await).await;
    assert!(body.contains("Please sign in to view your orders."));
}
