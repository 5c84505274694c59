//! Response-shape normalization.
//!
//! The backend services answer inconsistently: some routes return the
//! payload bare, some wrap it in `{data: …}`, the employees service wraps
//! reviews in `{resena: …}` / `{resenas: […]}`. Every response goes through
//! here exactly once and comes out in one canonical shape; client code
//! never branches on shape again.

use reqwest::Response;
use serde_json::Value;

use crate::error::ApiError;

/// Known single-payload wrapper keys, in precedence order.
const WRAPPER_KEYS: &[&str] = &["data", "resena", "resenas", "pedido", "pedidos"];

/// Read a response body: non-success statuses become
/// [`ApiError::Status`] with the backend's own message when present, empty
/// bodies become `Null`, everything else must be JSON.
pub(crate) async fn read_json(response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(ApiError::transport)?;

    if !status.is_success() {
        let message = serde_json::from_slice::<Value>(&bytes)
            .ok()
            .and_then(|body| backend_message(&body))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
        return Err(ApiError::Status {
            code: status.as_u16(),
            message,
        });
    }

    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Peel one wrapper layer, if any.
pub(crate) fn unwrap_payload(value: Value) -> Value {
    match value {
        Value::Object(mut map) => {
            for key in WRAPPER_KEYS {
                if let Some(inner) = map.remove(*key) {
                    if !inner.is_null() {
                        return inner;
                    }
                }
            }
            Value::Object(map)
        }
        other => other,
    }
}

/// The backend's own error text (`{message}` or `{error}`), if it sent one.
fn backend_message(body: &Value) -> Option<String> {
    for key in ["message", "error"] {
        if let Some(text) = body.get(key).and_then(Value::as_str) {
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
    }
    None
}

/// Decode a normalized payload into a concrete DTO.
pub(crate) fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Listing responses: either a full pagination envelope or a bare array
/// (some deployments answer with the raw item list). A bare array becomes a
/// single-page envelope.
pub(crate) fn into_page<T: serde::de::DeserializeOwned>(
    value: Value,
    page: u32,
    limit: u32,
) -> Result<wok_schemas::Page<T>, ApiError> {
    if value.get("pagination").is_some() {
        return decode(value);
    }
    let data: Vec<T> = decode(unwrap_payload(value))?;
    let total = data.len() as u64;
    Ok(wok_schemas::Page {
        data,
        pagination: wok_schemas::Pagination {
            page,
            limit,
            total,
            total_pages: 1,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_payload_passes_through() {
        let v = json!([1, 2, 3]);
        assert_eq!(unwrap_payload(v.clone()), v);
    }

    #[test]
    fn data_wrapper_is_peeled() {
        let v = json!({"data": {"pedido_id": "p1"}});
        assert_eq!(unwrap_payload(v), json!({"pedido_id": "p1"}));
    }

    #[test]
    fn review_wrappers_are_peeled() {
        assert_eq!(
            unwrap_payload(json!({"message": "ok", "resena": {"resena_id": "r1"}})),
            json!({"resena_id": "r1"})
        );
        assert_eq!(
            unwrap_payload(json!({"resenas": [{"resena_id": "r1"}]})),
            json!([{"resena_id": "r1"}])
        );
    }

    #[test]
    fn null_wrapper_value_does_not_count() {
        let v = json!({"data": null, "resena_id": "r1"});
        assert_eq!(unwrap_payload(v), json!({"resena_id": "r1"}));
    }

    #[test]
    fn object_without_wrapper_passes_through() {
        let v = json!({"pedido_id": "p1"});
        assert_eq!(unwrap_payload(v.clone()), v);
    }
}
