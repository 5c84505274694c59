//! Canonical order-status vocabulary.
//!
//! The backend's status strings are authoritative: `procesando`, `cocinando`,
//! `empacando`, `enviando`, `entregado`, `recibido`, `cancelado`. Exactly one
//! mapping to typed variants exists in the whole codebase: this one.
//! `entregado` (handed over, awaiting customer confirmation) and `recibido`
//! (confirmed by the customer) are distinct states.
//!
//! Unknown wire values are carried losslessly in [`OrderStatus::Other`] and
//! never rejected: the notification transport does not guarantee a closed
//! vocabulary, and a status the client cannot label must still flow through
//! the history timeline.

use std::fmt;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an order as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Processing,
    Cooking,
    Packing,
    EnRoute,
    /// Handed over to the customer; confirmation of receipt still pending.
    Delivered,
    /// Receipt confirmed by the customer. Terminal.
    Received,
    /// Terminal.
    Cancelled,
    /// A wire value outside the known vocabulary, kept verbatim.
    Other(String),
}

impl OrderStatus {
    /// Parse a backend status string. Never fails; unknown values become
    /// [`OrderStatus::Other`].
    pub fn from_wire(s: &str) -> Self {
        match s {
            "procesando" => OrderStatus::Processing,
            "cocinando" => OrderStatus::Cooking,
            "empacando" => OrderStatus::Packing,
            "enviando" => OrderStatus::EnRoute,
            "entregado" => OrderStatus::Delivered,
            "recibido" => OrderStatus::Received,
            "cancelado" => OrderStatus::Cancelled,
            other => OrderStatus::Other(other.to_string()),
        }
    }

    /// The backend's string for this status.
    pub fn as_wire(&self) -> &str {
        match self {
            OrderStatus::Processing => "procesando",
            OrderStatus::Cooking => "cocinando",
            OrderStatus::Packing => "empacando",
            OrderStatus::EnRoute => "enviando",
            OrderStatus::Delivered => "entregado",
            OrderStatus::Received => "recibido",
            OrderStatus::Cancelled => "cancelado",
            OrderStatus::Other(s) => s.as_str(),
        }
    }

    /// Customer-facing label. Purely presentational.
    pub fn label(&self) -> &str {
        match self {
            OrderStatus::Processing => "Procesando",
            OrderStatus::Cooking => "Cocinando",
            OrderStatus::Packing => "Empacando",
            OrderStatus::EnRoute => "En camino",
            OrderStatus::Delivered => "Entregado",
            OrderStatus::Received => "Recibido",
            OrderStatus::Cancelled => "Cancelado",
            OrderStatus::Other(s) => s.as_str(),
        }
    }

    /// Timeline icon for terminal display. Purely presentational.
    pub fn icon(&self) -> &'static str {
        match self {
            OrderStatus::Processing => "🕐",
            OrderStatus::Cooking => "👨\u{200d}🍳",
            OrderStatus::Packing => "📦",
            OrderStatus::EnRoute => "🚚",
            OrderStatus::Delivered => "📍",
            OrderStatus::Received => "✅",
            OrderStatus::Cancelled => "❌",
            OrderStatus::Other(_) => "•",
        }
    }

    /// True for statuses after which the backend emits no further updates.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Received | OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(OrderStatus::from_wire(&s))
    }
}
