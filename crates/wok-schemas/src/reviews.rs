//! Review REST DTOs.

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};

/// A customer review of a completed order.
///
/// The employees service stores `calificacion` as a Decimal; depending on
/// the route it reaches the client as a JSON number or a string. Both are
/// accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "resena_id")]
    pub review_id: String,
    #[serde(rename = "local_id")]
    pub store_id: String,
    #[serde(rename = "pedido_id")]
    pub order_id: String,
    #[serde(rename = "cocinero_dni", default)]
    pub cook_dni: Option<String>,
    #[serde(rename = "despachador_dni", default)]
    pub dispatcher_dni: Option<String>,
    #[serde(rename = "repartidor_dni", default)]
    pub courier_dni: Option<String>,
    /// Free-text comment. Empty when the customer left only a rating.
    #[serde(rename = "resena", default)]
    pub comment: String,
    /// 0.0 ..= 5.0
    #[serde(rename = "calificacion", deserialize_with = "rating_from_wire")]
    pub rating: f32,
}

fn rating_from_wire<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Number(f32),
        Text(String),
    }

    match Wire::deserialize(deserializer)? {
        Wire::Number(n) => Ok(n),
        Wire::Text(s) => s.trim().parse::<f32>().map_err(serde::de::Error::custom),
    }
}

/// Body of `POST /resenas`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReviewRequest {
    #[serde(rename = "local_id")]
    pub store_id: String,
    #[serde(rename = "pedido_id")]
    pub order_id: String,
    #[serde(rename = "calificacion")]
    pub rating: f32,
    #[serde(rename = "resena")]
    pub comment: String,
}

/// Body of `PUT /resenas/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateReviewRequest {
    #[serde(rename = "calificacion")]
    pub rating: f32,
    #[serde(rename = "resena")]
    pub comment: String,
}
