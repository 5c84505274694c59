//! The status-history reducer.

use wok_schemas::{Notification, NotificationKind, StatusHistoryEntry};

use crate::view::OrderView;

/// Fold one notification into the view.
///
/// Pure function of `(view, event)`; the input view is left untouched.
///
/// 1. Close the active entry (`ended_at` = event timestamp) when its status
///    differs from the event's.
/// 2. Append a new active entry unless one with the event's status is
///    already active, attaching the employee dni when the event carries one.
/// 3. Re-sort the whole history by `started_at` and force exactly the last
///    entry active. This re-derivation is authoritative: it restores the
///    single-active invariant no matter how events were ordered or
///    duplicated on the wire.
/// 4. `awaiting_confirmation` latches on a `CONFIRMAR_RECEPCION` action and
///    drops only on `PEDIDO_COMPLETADO`.
///
/// Applying the same event twice yields the same view, a direct
/// consequence of step 3.
pub fn apply_notification(view: &OrderView, note: &Notification) -> OrderView {
    let new_status = note.data.status.clone();
    let mut history = view.history.clone();

    if let Some(active) = history.iter_mut().find(|e| e.active) {
        if active.status != new_status {
            active.ended_at = Some(note.timestamp);
            active.active = false;
        }
    }

    let already_active = history
        .iter()
        .any(|e| e.active && e.status == new_status);
    if !already_active {
        history.push(StatusHistoryEntry {
            status: new_status,
            started_at: note.timestamp,
            ended_at: None,
            active: true,
            employee_dni: note.data.employee.as_ref().map(|e| e.dni.clone()),
        });
    }

    normalize_history(&mut history);

    let current_status = history
        .last()
        .map(|e| e.status.clone())
        .unwrap_or_else(|| view.current_status.clone());

    let awaiting_confirmation = if note.kind == NotificationKind::OrderCompleted {
        false
    } else {
        view.awaiting_confirmation || note.requests_confirmation()
    };

    OrderView {
        order_id: view.order_id.clone(),
        current_status,
        history,
        awaiting_confirmation,
    }
}

/// Sort ascending by `started_at` and force exactly the last entry active.
///
/// The sort is stable, so entries sharing a timestamp keep arrival order.
pub(crate) fn normalize_history(history: &mut [StatusHistoryEntry]) {
    history.sort_by(|a, b| a.started_at.cmp(&b.started_at));
    let len = history.len();
    for (idx, entry) in history.iter_mut().enumerate() {
        entry.active = idx + 1 == len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use wok_schemas::{
        EmployeeInfo, EmployeeRole, NotificationData, NotificationKind, OrderStatus,
    };

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn note(kind: NotificationKind, status: &str, at: &str) -> Notification {
        Notification {
            kind,
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

    #[test]
    fn first_event_on_empty_history_creates_single_active_entry() {
        let view = OrderView::new("p1");
        let next = apply_notification(
            &view,
            &note(NotificationKind::StatusUpdated, "cocinando", "2026-08-06T10:00:00Z"),
        );

        assert_eq!(next.history.len(), 1);
        assert_eq!(next.active_count(), 1);
        assert_eq!(next.current_status, OrderStatus::Cooking);
        assert_eq!(next.history[0].ended_at, None);
    }

    #[test]
    fn status_change_closes_previous_entry_with_event_timestamp() {
        let view = OrderView::new("p1");
        let view = apply_notification(
            &view,
            &note(NotificationKind::StatusUpdated, "cocinando", "2026-08-06T10:00:00Z"),
        );
        let view = apply_notification(
            &view,
            &note(NotificationKind::StatusChanged, "enviando", "2026-08-06T10:20:00Z"),
        );

        assert_eq!(view.history.len(), 2);
        assert_eq!(view.history[0].ended_at, Some(ts("2026-08-06T10:20:00Z")));
        assert!(!view.history[0].active);
        assert!(view.history[1].active);
        assert_eq!(view.current_status, OrderStatus::EnRoute);
    }

    #[test]
    fn employee_dni_attaches_to_the_new_entry_only() {
        let mut event = note(NotificationKind::StatusChanged, "enviando", "2026-08-06T10:20:00Z");
        event.data.employee = Some(EmployeeInfo {
            dni: "44556677".to_string(),
            name: "Rosa".to_string(),
            role: EmployeeRole::Courier,
        });

        let view = apply_notification(&OrderView::new("p1"), &event);
        assert_eq!(view.history[0].employee_dni.as_deref(), Some("44556677"));
    }

    #[test]
    fn same_status_event_does_not_append_or_close() {
        let view = OrderView::new("p1");
        let view = apply_notification(
            &view,
            &note(NotificationKind::StatusUpdated, "cocinando", "2026-08-06T10:00:00Z"),
        );
        let again = apply_notification(
            &view,
            &note(NotificationKind::StatusUpdated, "cocinando", "2026-08-06T10:05:00Z"),
        );

        assert_eq!(again.history.len(), 1);
        assert_eq!(again.history[0].started_at, ts("2026-08-06T10:00:00Z"));
        assert_eq!(again.history[0].ended_at, None);
    }

    #[test]
    fn unknown_status_vocabulary_flows_through() {
        let view = apply_notification(
            &OrderView::new("p1"),
            &note(NotificationKind::StatusUpdated, "reprogramado", "2026-08-06T10:00:00Z"),
        );
        assert_eq!(
            view.current_status,
            OrderStatus::Other("reprogramado".to_string())
        );
        assert_eq!(view.active_count(), 1);
    }
}
