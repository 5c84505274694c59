//! Order REST DTOs.
//!
//! Shapes match the order service's JSON bodies. Money fields are JSON
//! numbers on the wire and are carried as `f64` here, at the boundary only;
//! cart arithmetic upstream is integer cents (see `wok-session`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::OrderStatus;

/// One row of the order's status history (`historial_estados`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    #[serde(rename = "estado")]
    pub status: OrderStatus,
    #[serde(rename = "hora_inicio")]
    pub started_at: DateTime<Utc>,
    #[serde(rename = "hora_fin", default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(rename = "activo")]
    pub active: bool,
    #[serde(rename = "empleado_dni", default, skip_serializing_if = "Option::is_none")]
    pub employee_dni: Option<String>,
}

/// Product line on an order, by display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderProductLine {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
}

/// Combo line on an order, by combo id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderComboLine {
    pub combo_id: String,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
}

/// Detailed order as returned by the per-store order-detail fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetails {
    #[serde(rename = "pedido_id")]
    pub order_id: String,
    #[serde(rename = "local_id")]
    pub store_id: String,
    #[serde(rename = "estado")]
    pub status: OrderStatus,
    #[serde(rename = "costo", default)]
    pub total: f64,
    #[serde(rename = "direccion", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(
        rename = "fecha_entrega_aproximada",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_delivery: Option<DateTime<Utc>>,
    #[serde(rename = "historial_estados", default)]
    pub history: Vec<StatusHistoryEntry>,
    /// Backend flag: the order sits delivered, waiting for the customer to
    /// confirm receipt.
    #[serde(rename = "esperando_confirmacion", default)]
    pub awaiting_confirmation: bool,
    #[serde(rename = "productos", default)]
    pub products: Vec<OrderProductLine>,
    #[serde(rename = "combos", default)]
    pub combos: Vec<OrderComboLine>,
}

/// Compact order row for profile listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    #[serde(rename = "pedido_id")]
    pub order_id: String,
    #[serde(rename = "local_id")]
    pub store_id: String,
    #[serde(rename = "fecha", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total: f64,
    #[serde(rename = "estado")]
    pub status: OrderStatus,
}

/// Body of `POST /pedidos`.
///
/// `productos` / `combos` are omitted entirely when empty; the backend
/// rejects empty arrays on some deployments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(rename = "local_id")]
    pub store_id: String,
    #[serde(rename = "usuario_correo")]
    pub user_email: String,
    #[serde(rename = "costo")]
    pub total: f64,
    #[serde(rename = "direccion")]
    pub address: String,
    #[serde(rename = "productos", default, skip_serializing_if = "Vec::is_empty")]
    pub products: Vec<OrderProductLine>,
    #[serde(rename = "combos", default, skip_serializing_if = "Vec::is_empty")]
    pub combos: Vec<OrderComboLine>,
}

/// Acknowledgement returned by order creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAck {
    #[serde(rename = "pedido_id")]
    pub order_id: String,
    #[serde(rename = "local_id")]
    pub store_id: String,
    #[serde(rename = "usuario_correo")]
    pub user_email: String,
    #[serde(rename = "costo", default)]
    pub total: f64,
    #[serde(rename = "estado")]
    pub status: OrderStatus,
}

/// Paginated listing envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}
