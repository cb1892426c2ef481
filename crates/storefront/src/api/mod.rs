//! Sweet Delights backend REST API.
//!
//! The backend owns products, orders and users; the storefront only reads
//! them. [`ApiClient`] talks HTTP, while [`ProductSource`] and
//! [`OrderSource`] are the seams the view-models fetch through.

mod client;

use std::future::Future;

use thiserror::Error;

use sweet_delights_core::catalog::ProductQuery;
use sweet_delights_core::{Order, Product};

use crate::models::AccessToken;

pub use client::ApiClient;

/// Errors that can occur when calling the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request could not be sent or the response body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the access token.
    #[error("Unauthorized")]
    Unauthorized,

    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Response status code.
        status: u16,
        /// Start of the response body, for diagnostics.
        body: String,
    },

    /// The response was not the expected JSON.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Something that can list products for a query.
pub trait ProductSource: Send + Sync {
    /// Fetch the products matching `query`.
    fn products(
        &self,
        query: &ProductQuery,
    ) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;
}

/// Something that can list a user's orders.
pub trait OrderSource: Send + Sync {
    /// Fetch the orders visible to the holder of `token`.
    fn orders(
        &self,
        token: &AccessToken,
    ) -> impl Future<Output = Result<Vec<Order>, ApiError>> + Send;
}
