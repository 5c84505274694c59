//! Derived order view.

use serde::{Deserialize, Serialize};
use wok_schemas::{OrderDetails, OrderStatus, StatusHistoryEntry};

/// The client's canonical picture of one order: a chronological status
/// history with exactly one active entry, the current status, and whether
/// the viewer owes a receipt confirmation.
///
/// Created from the order-detail fetch, mutated only through
/// [`apply_notification`](crate::apply_notification), discarded when the
/// viewing session ends. Not persisted anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderView {
    pub order_id: String,
    pub current_status: OrderStatus,
    /// Ascending by `started_at`. Append-only, except that the previously
    /// active entry gets closed (`ended_at`/`active`) when the status moves.
    pub history: Vec<StatusHistoryEntry>,
    pub awaiting_confirmation: bool,
}

impl OrderView {
    /// Empty view for an order with no known history yet.
    pub fn new(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            current_status: OrderStatus::Processing,
            history: Vec::new(),
            awaiting_confirmation: false,
        }
    }

    /// Build the initial view from a detail fetch.
    ///
    /// The fetched history goes through the same normalization as live
    /// events (sort by `started_at`, re-derive the single active entry), so
    /// a disordered initial payload cannot violate the invariant either.
    pub fn from_detail(detail: &OrderDetails) -> Self {
        let mut history = detail.history.clone();
        crate::reducer::normalize_history(&mut history);

        let current_status = history
            .last()
            .map(|entry| entry.status.clone())
            .unwrap_or_else(|| detail.status.clone());

        Self {
            order_id: detail.order_id.clone(),
            current_status,
            history,
            awaiting_confirmation: detail.awaiting_confirmation,
        }
    }

    /// Number of entries flagged active. 1 after any event application;
    /// 0 only for a pre-event empty history.
    pub fn active_count(&self) -> usize {
        self.history.iter().filter(|e| e.active).count()
    }

    /// The active history entry, if any.
    pub fn active_entry(&self) -> Option<&StatusHistoryEntry> {
        self.history.iter().find(|e| e.active)
    }
}
