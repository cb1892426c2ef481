//! HTTP client for the backend REST API.
//!
//! Uses `reqwest` 0.13 for HTTP. Product listings are cached per canonical
//! query string using `moka`; orders are never cached.

use std::sync::Arc;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use sweet_delights_core::catalog::ProductQuery;
use sweet_delights_core::{Order, Product};

use super::{ApiError, OrderSource, ProductSource};
use crate::config::StorefrontConfig;
use crate::models::AccessToken;

/// Longest body excerpt kept in errors and logs.
const BODY_EXCERPT_LEN: usize = 200;

/// Client for the Sweet Delights backend.
///
/// Cheap to clone; clones share the connection pool and the product cache.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    products: Cache<String, Vec<Product>>,
}

impl ApiClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.api_timeout)
            .build()?;

        let products = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.api_url.clone(),
                products,
            }),
        })
    }

    /// List products, serving repeated queries from the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a product
    /// list.
    #[instrument(skip(self, query), fields(query = %query.to_query_string()))]
    pub async fn get_products(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
        let cache_key = query.to_query_string();

        if let Some(products) = self.inner.products.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let products = self.fetch_products(query).await?;

        self.inner
            .products
            .insert(cache_key, products.clone())
            .await;

        Ok(products)
    }

    /// List products straight from the backend, skipping the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a product
    /// list.
    pub async fn fetch_products(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
        let mut url = self.endpoint("products");
        if !query.is_empty() {
            url.set_query(Some(&query.to_query_string()));
        }

        self.execute(self.inner.client.get(url)).await
    }

    /// List the signed-in user's orders.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` if the token is rejected, or another
    /// error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn get_orders(&self, token: &AccessToken) -> Result<Vec<Order>, ApiError> {
        let request = self
            .inner
            .client
            .get(self.endpoint("orders"))
            .bearer_auth(token.expose());
        self.execute(request).await
    }

    /// `base_url` with `segment` appended as a path segment.
    fn endpoint(&self, segment: &str) -> Url {
        let mut url = self.inner.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(segment);
        }
        url
    }

    /// Send a request and decode a JSON response body.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %excerpt(&body),
                "Backend returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        if let Some(content_type) = content_type
            && !content_type.contains("json")
        {
            return Err(ApiError::Parse(format!(
                "unexpected content type '{content_type}'"
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %excerpt(&body),
                "Failed to parse backend response"
            );
            ApiError::Parse(e.to_string())
        })
    }
}

impl ProductSource for ApiClient {
    async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
        self.get_products(query).await
    }
}

impl OrderSource for ApiClient {
    async fn orders(&self, token: &AccessToken) -> Result<Vec<Order>, ApiError> {
        self.get_orders(token).await
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_LEN).collect()
}
