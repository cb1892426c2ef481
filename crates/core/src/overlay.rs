//! Order detail overlay.

use crate::types::OrderId;

/// Which order, if any, is shown in the detail overlay.
///
/// At most one order is open at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OrderDetailOverlay {
    #[default]
    Closed,
    Open(OrderId),
}

impl OrderDetailOverlay {
    /// Open `id`, replacing whatever was open.
    pub fn select(&mut self, id: OrderId) {
        *self = Self::Open(id);
    }

    pub fn dismiss(&mut self) {
        *self = Self::Closed;
    }

    #[must_use]
    pub const fn open_order(&self) -> Option<&OrderId> {
        match self {
            Self::Closed => None,
            Self::Open(id) => Some(id),
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }
}
