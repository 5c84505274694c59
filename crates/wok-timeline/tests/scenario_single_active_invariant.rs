//! Scenario: exactly one active history entry after every event.
//!
//! The reducer's re-derivation step (sort, then force only the last entry
//! active) must hold the single-active invariant across status changes,
//! repeats, out-of-order timestamps and unknown vocabulary: any sequence
//! the transport can produce.

use chrono::{DateTime, Utc};
use wok_schemas::{Notification, NotificationData, NotificationKind, OrderStatus, RequiredAction};
use wok_timeline::{apply_notification, OrderView};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn ts(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn note(status: &str, at: &str) -> Notification {
    Notification {
        kind: NotificationKind::StatusUpdated,
        order_id: "p1".to_string(),
        timestamp: ts(at),
        data: NotificationData {
            status: OrderStatus::from_wire(status),
            employee: None,
            message: String::new(),
            required_action: None,
            button_text: None,
            courier_dni: None,
        },
    }
}

// ---------------------------------------------------------------------------
// 1. Forward progression
// ---------------------------------------------------------------------------

#[test]
fn forward_progression_keeps_exactly_one_active() {
    let mut view = OrderView::new("p1");
    assert_eq!(view.active_count(), 0, "empty pre-event history has no active entry");

    for (status, at) in [
        ("procesando", "2026-08-06T10:00:00Z"),
        ("cocinando", "2026-08-06T10:10:00Z"),
        ("empacando", "2026-08-06T10:30:00Z"),
        ("enviando", "2026-08-06T10:45:00Z"),
        ("entregado", "2026-08-06T11:10:00Z"),
    ] {
        view = apply_notification(&view, &note(status, at));
        assert_eq!(view.active_count(), 1, "after {status}");
        assert_eq!(
            view.active_entry().unwrap().status,
            view.current_status,
            "current status must mirror the active entry"
        );
    }

    assert_eq!(view.history.len(), 5);
    assert_eq!(view.current_status, OrderStatus::Delivered);

    // Every closed entry carries an end timestamp; the active one does not.
    for entry in &view.history[..4] {
        assert!(entry.ended_at.is_some(), "closed entry must have ended_at");
    }
    assert_eq!(view.history[4].ended_at, None);
}

// ---------------------------------------------------------------------------
// 2. Adversarial mix: duplicates, stale timestamps, unknown vocabulary
// ---------------------------------------------------------------------------

#[test]
fn adversarial_sequence_never_breaks_the_invariant() {
    let events = [
        note("cocinando", "2026-08-06T10:10:00Z"),
        note("cocinando", "2026-08-06T10:10:00Z"), // exact duplicate
        note("enviando", "2026-08-06T10:45:00Z"),
        note("procesando", "2026-08-06T10:00:00Z"), // stale, sorts to the front
        note("reprogramado", "2026-08-06T10:50:00Z"), // unknown vocabulary
        note("enviando", "2026-08-06T10:55:00Z"),
    ];

    let mut view = OrderView::new("p1");
    for event in &events {
        view = apply_notification(&view, event);
        assert_eq!(view.active_count(), 1);
    }

    // History sorted ascending throughout.
    for pair in view.history.windows(2) {
        assert!(pair[0].started_at <= pair[1].started_at, "history must stay sorted");
    }

    // Latest timestamp wins the active slot.
    assert_eq!(view.current_status, OrderStatus::EnRoute);
    assert_eq!(view.active_entry().unwrap().started_at, ts("2026-08-06T10:55:00Z"));
}

// ---------------------------------------------------------------------------
// 3. The worked example from the tracking page
// ---------------------------------------------------------------------------

#[test]
fn delivery_flow_example() {
    let mut view = OrderView::new("p1");

    view = apply_notification(&view, &note("cocinando", "2026-08-06T10:00:00Z"));
    assert_eq!(view.history.len(), 1);
    assert!(view.history[0].active);

    view = apply_notification(&view, &note("enviando", "2026-08-06T10:30:00Z"));
    assert_eq!(view.history.len(), 2);
    assert_eq!(view.history[0].ended_at, Some(ts("2026-08-06T10:30:00Z")));
    assert!(!view.history[0].active);
    assert!(view.history[1].active);
    assert_eq!(view.current_status, OrderStatus::EnRoute);

    let mut delivered = note("entregado", "2026-08-06T11:00:00Z");
    delivered.kind = NotificationKind::OrderDelivered;
    delivered.data.required_action = Some(RequiredAction::ConfirmReceipt);
    view = apply_notification(&view, &delivered);
    assert!(view.awaiting_confirmation);

    let mut completed = note("recibido", "2026-08-06T11:05:00Z");
    completed.kind = NotificationKind::OrderCompleted;
    view = apply_notification(&view, &completed);
    assert!(!view.awaiting_confirmation, "completion clears the flag regardless of payload");
    assert_eq!(view.active_count(), 1);
    assert_eq!(view.current_status, OrderStatus::Received);
}
