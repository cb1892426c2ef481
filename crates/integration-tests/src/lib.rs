//! Integration test harness for the Sweet Delights storefront.
//!
//! Each test gets its own [`TestApp`]: a `wiremock` server standing in for
//! the backend REST API and a storefront router pointed at it. Requests are
//! driven in-process with `tower::ServiceExt::oneshot`, so no port is bound
//! for the storefront itself.
//!
//! Sign-in is owned by an external auth service, so the harness mounts a
//! test-only `POST /test/sign-in` route that writes a `CurrentUser` into the
//! session the same way that service would.

use std::net::TcpListener;
use std::path::PathBuf;

use axum::{
    Form, Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
    routing::post,
};
use serde::Deserialize;
use tower::ServiceExt;
use tower_sessions::Session;
use url::Url;
use wiremock::MockServer;

use sweet_delights_core::UserId;
use sweet_delights_storefront::config::StorefrontConfig;
use sweet_delights_storefront::middleware::set_current_user;
use sweet_delights_storefront::models::{AccessToken, CurrentUser};
use sweet_delights_storefront::state::AppState;

/// Path of the test-only sign-in route.
pub const SIGN_IN_PATH: &str = "/test/sign-in";

/// A storefront wired to a mock backend.
pub struct TestApp {
    /// Mock backend; mounted under `/api`.
    pub backend: MockServer,
    pub state: AppState,
    router: Router,
}

impl TestApp {
    /// Start a mock backend and build a storefront for it.
    ///
    /// # Panics
    ///
    /// Panics if the storefront cannot be built.
    pub async fn start() -> Self {
        Self::start_with(|_| {}).await
    }

    /// Like [`TestApp::start`], with `configure` applied to the storefront
    /// configuration before the app is built.
    ///
    /// # Panics
    ///
    /// Panics if the storefront cannot be built.
    pub async fn start_with(configure: impl FnOnce(&mut StorefrontConfig)) -> Self {
        let backend = MockServer::start().await;
        let mut config = config_for(&backend);
        configure(&mut config);
        let state = AppState::new(config).expect("Failed to build app state");
        let router = sweet_delights_storefront::app_with(test_routes(), state.clone());

        Self {
            backend,
            state,
            router,
        }
    }

    /// Send one request through the storefront.
    ///
    /// # Panics
    ///
    /// Panics if the router fails, which it never should.
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible")
    }

    /// `GET` a path, optionally with a session cookie.
    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response<Body> {
        self.send(request("GET", path, cookie, None)).await
    }

    /// `GET` a path as HTMX does.
    pub async fn get_htmx(&self, path: &str) -> Response<Body> {
        let request = Request::get(path)
            .header("HX-Request", "true")
            .body(Body::empty())
            .expect("Valid request");
        self.send(request).await
    }

    /// `POST` a url-encoded form, optionally with a session cookie.
    pub async fn post_form(&self, path: &str, form: &str, cookie: Option<&str>) -> Response<Body> {
        self.send(request("POST", path, cookie, Some(form))).await
    }

    /// Sign a user in and return the session cookie.
    ///
    /// # Panics
    ///
    /// Panics if the sign-in route does not set a session cookie.
    pub async fn sign_in(&self, token: &str) -> String {
        let form = format!("id=user-1&name=Asha&email=asha%40example.com&token={token}");
        let response = self.post_form(SIGN_IN_PATH, &form, None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        session_cookie(&response).expect("Sign-in sets the session cookie")
    }
}

/// Storefront configuration pointing at `backend`.
///
/// # Panics
///
/// Panics if the mock server URI is not a URL.
#[must_use]
pub fn config_for(backend: &MockServer) -> StorefrontConfig {
    let api_url = Url::parse(&format!("{}/api", backend.uri())).expect("Mock server URI is a URL");
    StorefrontConfig {
        api_url,
        static_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront/static"),
        ..StorefrontConfig::default()
    }
}

/// An API URL on a local port nothing listens on, so connections are refused.
///
/// # Panics
///
/// Panics if no local port can be reserved.
#[must_use]
pub fn unreachable_api_url() -> Url {
    let port = TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .expect("Failed to reserve a local port")
        .port();
    Url::parse(&format!("http://127.0.0.1:{port}/api")).expect("Valid URL")
}

/// The `name=value` pair from a response's `Set-Cookie` header.
#[must_use]
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

/// Read a response body as UTF-8 text.
///
/// # Panics
///
/// Panics if the body cannot be read or is not UTF-8.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is UTF-8")
}

/// Value of a response header as a string.
#[must_use]
pub fn header_value<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

/// A product as the backend returns it.
#[must_use]
pub fn product_json(id: &str, name: &str, rating: f64) -> serde_json::Value {
    serde_json::json!({
        "_id": id,
        "name": name,
        "description": "Baked fresh every morning",
        "price": 650,
        "originalPrice": 750,
        "image": format!("https://images.example.com/{id}.jpg"),
        "category": "chocolate",
        "rating": rating,
        "reviews": 12,
        "inStock": true,
        "tags": []
    })
}

/// An order as the backend returns it.
#[must_use]
pub fn order_json(id: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "_id": id,
        "items": [
            {
                "product": {"_id": "p1", "name": "Red Velvet", "image": "https://images.example.com/p1.jpg"},
                "quantity": 2,
                "price": 650
            }
        ],
        "totalAmount": 1300,
        "status": status,
        "paymentStatus": "completed",
        "orderDate": "2026-02-14T09:30:00Z",
        "deliveryAddress": {"street": "12 MG Road", "city": "Pune", "state": "MH", "pincode": "411001"}
    })
}

fn request(method: &str, path: &str, cookie: Option<&str>, form: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let body = match form {
        Some(form) => {
            builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
            Body::from(form.to_string())
        }
        None => Body::empty(),
    };
    builder.body(body).expect("Valid request")
}

#[derive(Deserialize)]
struct SignInForm {
    id: String,
    name: String,
    email: String,
    token: String,
}

fn test_routes() -> Router<AppState> {
    Router::new().route(SIGN_IN_PATH, post(sign_in))
}

async fn sign_in(session: Session, Form(form): Form<SignInForm>) -> StatusCode {
    let user = CurrentUser {
        id: UserId::new(form.id),
        name: form.name,
        email: form.email,
        token: AccessToken::new(form.token),
    };
    match set_current_user(&session, &user).await {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
