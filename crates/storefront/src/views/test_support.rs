//! Fakes for view-model tests.

use std::future::pending;
use std::net::TcpListener;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use sweet_delights_core::catalog::ProductQuery;
use sweet_delights_core::{Order, Product};

use url::Url;

use crate::api::{ApiClient, ApiError, OrderSource, ProductSource};
use crate::config::StorefrontConfig;
use crate::models::AccessToken;

/// Product source that replays a canned response and records queries.
pub struct FakeProducts {
    response: Mutex<Option<Result<Vec<Product>, ApiError>>>,
    pub queries: Mutex<Vec<String>>,
}

impl FakeProducts {
    pub fn ok(products: Vec<Product>) -> Self {
        Self::with(Ok(products))
    }

    pub fn failing() -> Self {
        Self::with(Err(ApiError::Status {
            status: 503,
            body: "unavailable".to_string(),
        }))
    }

    fn with(response: Result<Vec<Product>, ApiError>) -> Self {
        Self {
            response: Mutex::new(Some(response)),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded_queries(&self) -> Vec<String> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

impl ProductSource for FakeProducts {
    async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.to_query_string());
        }
        self.response
            .lock()
            .ok()
            .and_then(|mut r| r.take())
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Product source whose responses never arrive.
pub struct StalledProducts;

impl ProductSource for StalledProducts {
    async fn products(&self, _query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
        pending().await
    }
}

/// Order source whose responses never arrive.
pub struct StalledOrders;

impl OrderSource for StalledOrders {
    async fn orders(&self, _token: &AccessToken) -> Result<Vec<Order>, ApiError> {
        pending().await
    }
}

/// A real client for a local port nothing listens on.
pub fn unreachable_client() -> ApiClient {
    let port = TcpListener::bind("127.0.0.1:0")
        .and_then(|listener| listener.local_addr())
        .unwrap_or_else(|e| panic!("{e}"))
        .port();
    let config = StorefrontConfig {
        api_url: Url::parse(&format!("http://127.0.0.1:{port}/api"))
            .unwrap_or_else(|e| panic!("{e}")),
        ..StorefrontConfig::default()
    };
    ApiClient::new(&config).unwrap_or_else(|e| panic!("{e}"))
}

/// Order source that replays a canned response and counts calls.
pub struct FakeOrders {
    response: Mutex<Option<Result<Vec<Order>, ApiError>>>,
    pub calls: AtomicUsize,
}

impl FakeOrders {
    pub fn ok(orders: Vec<Order>) -> Self {
        Self::with(Ok(orders))
    }

    pub fn with(response: Result<Vec<Order>, ApiError>) -> Self {
        Self {
            response: Mutex::new(Some(response)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OrderSource for FakeOrders {
    async fn orders(&self, _token: &AccessToken) -> Result<Vec<Order>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response
            .lock()
            .ok()
            .and_then(|mut r| r.take())
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

pub fn cake(id: &str, rating: f64) -> Product {
    serde_json::from_value(serde_json::json!({
        "_id": id,
        "name": format!("Cake {id}"),
        "price": 500,
        "rating": rating,
        "category": "chocolate",
    }))
    .unwrap_or_else(|e| panic!("{e}"))
}

pub fn order(id: &str, status: &str) -> Order {
    serde_json::from_value(serde_json::json!({
        "_id": id,
        "items": [
            {"product": {"_id": "p1", "name": "Black Forest", "image": "bf.jpg"}, "quantity": 1, "price": 750}
        ],
        "totalAmount": 750,
        "status": status,
        "paymentStatus": "completed",
        "orderDate": "2026-03-01T10:15:00Z",
        "deliveryAddress": {"street": "4 Park St", "city": "Kolkata", "state": "WB", "pincode": "700016"}
    }))
    .unwrap_or_else(|e| panic!("{e}"))
}
