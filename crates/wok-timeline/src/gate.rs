//! Confirmation gate.
//!
//! Whether the viewer must be shown a "confirm receipt" affordance. Two
//! sources can raise it: the `esperando_confirmacion` flag on the initial
//! detail fetch, and a live event carrying `accion_requerida` (folded into
//! [`OrderView::awaiting_confirmation`]). Only an observed
//! `PEDIDO_COMPLETADO` event lowers it. A successful confirm-delivery call
//! does NOT lower it: the authoritative state change arrives back through
//! the notification stream, not the call's return.

use serde::{Deserialize, Serialize};
use wok_schemas::{Notification, NotificationKind};

use crate::view::OrderView;

/// Viewer-facing phase of one tracked order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerPhase {
    /// Following live updates; nothing asked of the viewer.
    AwaitingEvents,
    /// The viewer owes a receipt confirmation.
    AwaitingConfirmation,
    /// `PEDIDO_COMPLETADO` observed. Terminal; no further transitions.
    Closed,
}

/// Completion latch plus the initial-fetch confirmation flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationGate {
    initial_flag: bool,
    completed: bool,
}

impl ConfirmationGate {
    /// `initial_flag`: the `esperando_confirmacion` boolean from the order
    /// detail fetch.
    pub fn new(initial_flag: bool) -> Self {
        Self {
            initial_flag,
            completed: false,
        }
    }

    /// Feed every notification through here (before or after the reducer;
    /// the gate only looks at the event kind).
    pub fn observe(&mut self, note: &Notification) {
        if note.kind == NotificationKind::OrderCompleted {
            self.completed = true;
        }
    }

    /// Should the confirm affordance be shown right now?
    pub fn awaiting(&self, view: &OrderView) -> bool {
        !self.completed && (self.initial_flag || view.awaiting_confirmation)
    }

    pub fn is_closed(&self) -> bool {
        self.completed
    }

    pub fn phase(&self, view: &OrderView) -> TrackerPhase {
        if self.completed {
            TrackerPhase::Closed
        } else if self.awaiting(view) {
            TrackerPhase::AwaitingConfirmation
        } else {
            TrackerPhase::AwaitingEvents
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use wok_schemas::{NotificationData, OrderStatus, RequiredAction};

    fn completed_note() -> Notification {
        Notification {
            kind: NotificationKind::OrderCompleted,
            order_id: "p1".to_string(),
            timestamp: Utc::now(),
            data: NotificationData {
                status: OrderStatus::Received,
                employee: None,
                message: String::new(),
                required_action: None,
                button_text: None,
                courier_dni: None,
            },
        }
    }

    #[test]
    fn initial_flag_alone_raises_the_gate() {
        let gate = ConfirmationGate::new(true);
        let view = OrderView::new("p1");
        assert!(gate.awaiting(&view));
        assert_eq!(gate.phase(&view), TrackerPhase::AwaitingConfirmation);
    }

    #[test]
    fn live_derived_flag_alone_raises_the_gate() {
        let gate = ConfirmationGate::new(false);
        let mut view = OrderView::new("p1");
        view.awaiting_confirmation = true;
        assert!(gate.awaiting(&view));
    }

    #[test]
    fn completion_clears_both_sources_and_is_terminal() {
        let mut gate = ConfirmationGate::new(true);
        let mut view = OrderView::new("p1");
        view.awaiting_confirmation = true;

        gate.observe(&completed_note());
        assert!(!gate.awaiting(&view));
        assert_eq!(gate.phase(&view), TrackerPhase::Closed);

        // A stray confirm request after closure changes nothing.
        let mut stray = completed_note();
        stray.kind = NotificationKind::OrderDelivered;
        stray.data.required_action = Some(RequiredAction::ConfirmReceipt);
        gate.observe(&stray);
        assert_eq!(gate.phase(&view), TrackerPhase::Closed);
    }
}
