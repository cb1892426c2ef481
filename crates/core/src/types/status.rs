//! Status enums for orders and payments.
//!
//! The backend sends statuses as lowercase strings. Values this build does
//! not know about deserialize into `Other` instead of failing the whole
//! order list, and keep their raw label for display.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Delivered,
    Cancelled,
    /// A status the storefront does not recognize.
    Other(String),
}

impl OrderStatus {
    /// Every status the storefront knows how to present.
    pub const KNOWN: [Self; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::Preparing,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Wire label for the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "confirmed" => Self::Confirmed,
            "preparing" => Self::Preparing,
            "delivered" => Self::Delivered,
            "cancelled" => Self::Cancelled,
            _ => Self::Other(value),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment status of an order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    /// A status the storefront does not recognize.
    Other(String),
}

impl PaymentStatus {
    /// Every payment status the storefront knows how to present.
    pub const KNOWN: [Self; 3] = [Self::Pending, Self::Completed, Self::Failed];

    /// Wire label for the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for PaymentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "pending" => Self::Pending,
            "completed" => Self::Completed,
            "failed" => Self::Failed,
            _ => Self::Other(value),
        }
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_round_trip_through_labels() {
        for status in OrderStatus::KNOWN {
            assert_eq!(OrderStatus::from(status.as_str().to_owned()), status);
        }
        for status in PaymentStatus::KNOWN {
            assert_eq!(PaymentStatus::from(status.as_str().to_owned()), status);
        }
    }

    #[test]
    fn unknown_status_is_preserved() {
        let status: OrderStatus = serde_json::from_str("\"out-for-delivery\"").unwrap_or_default();
        assert_eq!(status, OrderStatus::Other("out-for-delivery".to_owned()));
        assert_eq!(status.to_string(), "out-for-delivery");
    }

    #[test]
    fn status_serializes_as_label() {
        let json = serde_json::to_string(&PaymentStatus::Completed).unwrap_or_default();
        assert_eq!(json, "\"completed\"");
    }
}
