//! Notification and REST fixture builders.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use uuid::Uuid;
use wok_schemas::{
    Notification, NotificationData, NotificationKind, OrderStatus, RequiredAction,
};

/// A fresh random order id, uuid-shaped like the backend's.
pub fn fresh_order_id() -> String {
    Uuid::new_v4().to_string()
}

fn instant(raw: &str) -> DateTime<Utc> {
    raw.parse().expect("fixture timestamp is valid RFC 3339")
}

/// A plain status-progress event.
pub fn status_event(order_id: &str, status: &str, timestamp: &str) -> Notification {
    Notification {
        kind: NotificationKind::StatusUpdated,
        order_id: order_id.to_string(),
        timestamp: instant(timestamp),
        data: NotificationData {
            status: OrderStatus::from_wire(status),
            employee: None,
            message: format!("Tu pedido está {status}"),
            required_action: None,
            button_text: None,
            courier_dni: None,
        },
    }
}

/// The handed-over event asking the customer to confirm receipt.
pub fn delivered_event(order_id: &str, timestamp: &str) -> Notification {
    Notification {
        kind: NotificationKind::OrderDelivered,
        order_id: order_id.to_string(),
        timestamp: instant(timestamp),
        data: NotificationData {
            status: OrderStatus::Delivered,
            employee: None,
            message: "¡Tu pedido ha llegado!".to_string(),
            required_action: Some(RequiredAction::ConfirmReceipt),
            button_text: Some("Confirmar Recepción".to_string()),
            courier_dni: None,
        },
    }
}

/// The terminal completion event.
pub fn completed_event(order_id: &str, timestamp: &str) -> Notification {
    Notification {
        kind: NotificationKind::OrderCompleted,
        order_id: order_id.to_string(),
        timestamp: instant(timestamp),
        data: NotificationData {
            status: OrderStatus::Received,
            employee: None,
            message: "Pedido completado. ¡Gracias!".to_string(),
            required_action: None,
            button_text: None,
            courier_dni: None,
        },
    }
}

/// An order-detail REST body with one active history row.
pub fn order_detail_body(
    order_id: &str,
    store_id: &str,
    status: &str,
    awaiting_confirmation: bool,
) -> Value {
    json!({
        "pedido_id": order_id,
        "local_id": store_id,
        "estado": status,
        "costo": 57.9,
        "direccion": "Av. Brasil 123, Jesús María, Lima",
        "esperando_confirmacion": awaiting_confirmation,
        "historial_estados": [
            {
                "estado": status,
                "hora_inicio": "2026-08-06T17:00:00Z",
                "activo": true
            }
        ],
        "productos": [{"nombre": "Arroz Chaufa", "cantidad": 2}]
    })
}
