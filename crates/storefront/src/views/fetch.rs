//! Fetch tickets.
//!
//! Every fetch a view starts is stamped with a ticket. Only a response
//! carrying the most recently issued ticket may touch the view; anything
//! older is stale and dropped.

/// Sequence number attached to one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// Issues tickets for one view.
#[derive(Debug, Default)]
pub struct FetchSequence {
    latest: u64,
}

impl FetchSequence {
    /// Issue a ticket that supersedes every earlier one.
    pub const fn issue(&mut self) -> FetchTicket {
        self.latest += 1;
        FetchTicket(self.latest)
    }

    #[must_use]
    pub const fn is_latest(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.latest
    }
}

/// What happened when a fetch result reached its view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The result replaced the view's data.
    Applied,
    /// The fetch failed and the view was cleared.
    Failed {
        /// The backend rejected the user's token.
        unauthorized: bool,
    },
    /// A newer fetch was issued; the result was discarded.
    Stale,
    /// The view scope ended before the response arrived.
    Cancelled,
}
