//! Integration tests for health checks, static assets and response headers.

use axum::http::StatusCode;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use sweet_delights_integration_tests::{TestApp, body_text, header_value, product_json};

#[tokio::test]
async fn liveness_does_not_touch_backend() {
    let app = TestApp::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.backend)
        .await;

    let response = app.get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn readiness_follows_backend() {
    let app = TestApp::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&app.backend)
        .await;

    let response = app.get("/health/ready", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn readiness_fails_when_backend_is_down() {
    let app = TestApp::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&app.backend)
        .await;

    let response = app.get("/health/ready", None).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn readiness_notices_outage_while_catalog_is_cached() {
    let app = TestApp::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([product_json("p1", "Red Velvet", 4.5)])),
        )
        .up_to_n_times(1)
        .mount(&app.backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&app.backend)
        .await;

    // The unfiltered catalog caches the default product query.
    let catalog = app.get("/products", None).await;
    assert!(body_text(catalog).await.contains("1 cakes found"));

    let response = app.get("/health/ready", None).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn pages_carry_security_headers_and_request_id() {
    let app = TestApp::start().await;

    let response = app.get("/health", None).await;

    assert_eq!(header_value(&response, "x-frame-options"), Some("DENY"));
    assert_eq!(header_value(&response, "x-content-type-options"), Some("nosniff"));
    assert!(header_value(&response, "content-security-policy").is_some());
    assert!(
        header_value(&response, "cache-control").is_some_and(|v| v.contains("no-store"))
    );
    assert!(header_value(&response, "x-request-id").is_some_and(|v| !v.is_empty()));
}

#[tokio::test]
async fn upstream_request_id_is_echoed() {
    let app = TestApp::start().await;

    let request = axum::http::Request::get("/health")
        .header("x-request-id", "edge-42")
        .body(axum::body::Body::empty())
        .expect("Valid request");
    let response = app.send(request).await;

    assert_eq!(header_value(&response, "x-request-id"), Some("edge-42"));
}

#[tokio::test]
async fn static_assets_are_served_immutable() {
    let app = TestApp::start().await;

    let response = app.get("/static/icons.svg", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        header_value(&response, "cache-control").is_some_and(|v| v.contains("immutable"))
    );
    assert!(body_text(response).await.contains(r#"<symbol id="package""#));
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let app = TestApp::start().await;

    let response = app.get("/no-such-page", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(header_value(&response, "x-frame-options"), Some("DENY"));
    assert_eq!(body_text(response).await, "Not found: /no-such-page");
}
