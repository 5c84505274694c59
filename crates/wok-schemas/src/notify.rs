//! Notification-stream wire format.
//!
//! One JSON object per WebSocket text frame:
//!
//! ```json
//! {
//!   "tipo": "ESTADO_CAMBIADO",
//!   "pedido_id": "…",
//!   "timestamp": "2026-08-06T18:12:03Z",
//!   "datos": {
//!     "estado": "enviando",
//!     "empleado": { "dni": "…", "nombre": "…", "role": "Repartidor" },
//!     "mensaje": "Tu pedido va en camino",
//!     "accion_requerida": "CONFIRMAR_RECEPCION",
//!     "texto_boton": "Confirmar Recepción",
//!     "repartidor_dni": "…"
//!   }
//! }
//! ```
//!
//! The envelope kind vocabulary is closed (an unknown `tipo` is a decode
//! error, handled by the channel's malformed-payload path). The inner
//! `accion_requerida` and employee `role` parse leniently so an unrelated
//! new value cannot knock out status delivery.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::OrderStatus;

/// Event kind carried in the `tipo` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    #[serde(rename = "ESTADO_ACTUALIZADO")]
    StatusUpdated,
    #[serde(rename = "ESTADO_CAMBIADO")]
    StatusChanged,
    #[serde(rename = "PEDIDO_ENTREGADO")]
    OrderDelivered,
    #[serde(rename = "PEDIDO_COMPLETADO")]
    OrderCompleted,
}

/// Client action requested by an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequiredAction {
    #[serde(rename = "CONFIRMAR_RECEPCION")]
    ConfirmReceipt,
    /// Forward-compatibility: an action this client does not know about.
    #[serde(other)]
    Unknown,
}

/// Role of the employee attached to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmployeeRole {
    #[serde(rename = "Cocinero")]
    Cook,
    #[serde(rename = "Despachador")]
    Dispatcher,
    #[serde(rename = "Repartidor")]
    Courier,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeInfo {
    pub dni: String,
    #[serde(rename = "nombre")]
    pub name: String,
    pub role: EmployeeRole,
}

/// Payload of a notification (`datos`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationData {
    #[serde(rename = "estado")]
    pub status: OrderStatus,
    #[serde(rename = "empleado", default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<EmployeeInfo>,
    #[serde(rename = "mensaje", default)]
    pub message: String,
    #[serde(
        rename = "accion_requerida",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub required_action: Option<RequiredAction>,
    #[serde(rename = "texto_boton", default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(
        rename = "repartidor_dni",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub courier_dni: Option<String>,
}

/// One event from the per-order notification stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(rename = "tipo")]
    pub kind: NotificationKind,
    #[serde(rename = "pedido_id")]
    pub order_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "datos")]
    pub data: NotificationData,
}

impl Notification {
    /// True when this event asks the viewer to confirm receipt.
    pub fn requests_confirmation(&self) -> bool {
        self.data.required_action == Some(RequiredAction::ConfirmReceipt)
    }
}
