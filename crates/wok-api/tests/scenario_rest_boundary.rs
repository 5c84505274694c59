//! Scenario: REST clients against a mock backend.
//!
//! Covers the response-shape normalization (bare vs `{data}` vs `{resena}`
//! wrappers), backend error-message extraction, the 404-means-empty review
//! listing, bearer-token injection and the cached store-review coalescing.

use httpmock::prelude::*;
use reqwest::Url;
use serde_json::json;
use wok_api::{ApiError, CachedStoreReviews, OrderGateway, OrdersClient, ReviewsClient};
use wok_schemas::{CreateOrderRequest, OrderProductLine, OrderStatus};

fn base(server: &MockServer) -> Url {
    Url::parse(&server.base_url()).unwrap()
}

// ---------------------------------------------------------------------------
// Order detail
// ---------------------------------------------------------------------------

#[tokio::test]
async fn order_detail_unwraps_the_data_envelope_and_sends_the_bearer_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/locales/LIM-01/pedidos/p1")
                .header("authorization", "Bearer tok-123");
            then.status(200).json_body(json!({
                "data": {
                    "pedido_id": "p1",
                    "local_id": "LIM-01",
                    "estado": "enviando",
                    "costo": 57.9,
                    "esperando_confirmacion": false,
                    "historial_estados": [
                        {"estado": "procesando", "hora_inicio": "2026-08-06T17:00:00Z",
                         "activo": true}
                    ]
                }
            }));
        })
        .await;

    let client = OrdersClient::new(base(&server)).with_auth_token("tok-123");
    let detail = client.order_detail("LIM-01", "p1").await.unwrap();

    mock.assert_async().await;
    assert_eq!(detail.status, OrderStatus::EnRoute);
    assert_eq!(detail.history.len(), 1);
}

#[tokio::test]
async fn order_detail_accepts_a_bare_payload() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/locales/LIM-01/pedidos/p1");
            then.status(200).json_body(json!({
                "pedido_id": "p1",
                "local_id": "LIM-01",
                "estado": "cocinando",
                "costo": 30.0,
                "esperando_confirmacion": true
            }));
        })
        .await;

    let client = OrdersClient::new(base(&server));
    let detail = client.order_detail("LIM-01", "p1").await.unwrap();
    assert_eq!(detail.status, OrderStatus::Cooking);
    assert!(detail.awaiting_confirmation);
    assert!(detail.history.is_empty());
}

#[tokio::test]
async fn backend_error_text_is_surfaced_in_the_status_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/locales/LIM-01/pedidos/nope");
            then.status(404)
                .json_body(json!({"error": "Pedido no encontrado"}));
        })
        .await;

    let client = OrdersClient::new(base(&server));
    let err = client.order_detail("LIM-01", "nope").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::Status {
            code: 404,
            message: "Pedido no encontrado".to_string()
        }
    );
}

// ---------------------------------------------------------------------------
// Confirm delivery
// ---------------------------------------------------------------------------

#[tokio::test]
async fn confirm_delivery_posts_the_identity_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/pedidos/p1/confirmar").json_body(json!({
                "usuario_correo": "ana@example.com",
                "local_id": "LIM-01"
            }));
            then.status(200).json_body(json!({"message": "ok"}));
        })
        .await;

    let client = OrdersClient::new(base(&server));
    client
        .confirm_delivery("p1", "ana@example.com", "LIM-01")
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn confirm_delivery_failure_is_returned_to_the_caller() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/pedidos/p1/confirmar");
            then.status(409)
                .json_body(json!({"message": "El pedido aún no fue entregado"}));
        })
        .await;

    let client = OrdersClient::new(base(&server));
    let err = client
        .confirm_delivery("p1", "ana@example.com", "LIM-01")
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(409));
}

// ---------------------------------------------------------------------------
// Create + list orders
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_order_sends_the_wire_shape_and_decodes_the_ack() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/pedidos").json_body(json!({
                "local_id": "LIM-01",
                "usuario_correo": "ana@example.com",
                "costo": 25.5,
                "direccion": "Av. Brasil 123, Jesús María, Lima",
                "productos": [{"nombre": "Arroz Chaufa", "cantidad": 2}]
            }));
            then.status(201).json_body(json!({
                "data": {
                    "pedido_id": "p-new",
                    "local_id": "LIM-01",
                    "usuario_correo": "ana@example.com",
                    "costo": 25.5,
                    "estado": "procesando"
                }
            }));
        })
        .await;

    let client = OrdersClient::new(base(&server));
    let ack = client
        .create_order(&CreateOrderRequest {
            store_id: "LIM-01".to_string(),
            user_email: "ana@example.com".to_string(),
            total: 25.5,
            address: "Av. Brasil 123, Jesús María, Lima".to_string(),
            products: vec![OrderProductLine {
                name: "Arroz Chaufa".to_string(),
                quantity: 2,
            }],
            combos: Vec::new(),
        })
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(ack.order_id, "p-new");
    assert_eq!(ack.status, OrderStatus::Processing);
}

#[tokio::test]
async fn list_orders_accepts_a_bare_array_as_a_single_page() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/pedidos")
                .query_param("usuario_correo", "ana@example.com");
            then.status(200).json_body(json!([
                {"pedido_id": "p1", "local_id": "LIM-01", "total": 30.0, "estado": "recibido"},
                {"pedido_id": "p2", "local_id": "LIM-01", "total": 12.5, "estado": "cocinando"}
            ]));
        })
        .await;

    let client = OrdersClient::new(base(&server));
    let page = client.list_orders("ana@example.com", 1, 10).await.unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.pagination.total, 2);
    assert_eq!(page.pagination.page, 1);
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_review_unwraps_the_resena_envelope() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/resenas").json_body(json!({
                "local_id": "LIM-01",
                "pedido_id": "p1",
                "calificacion": 4.5,
                "resena": "Muy rico"
            }));
            then.status(201).json_body(json!({
                "message": "Reseña creada",
                "resena": {
                    "resena_id": "r1",
                    "local_id": "LIM-01",
                    "pedido_id": "p1",
                    "calificacion": "4.5",
                    "resena": "Muy rico"
                }
            }));
        })
        .await;

    let client = ReviewsClient::new(base(&server));
    let review = client
        .create_review("LIM-01", "p1", 4.5, "Muy rico")
        .await
        .unwrap();
    assert_eq!(review.review_id, "r1");
    assert_eq!(review.rating, 4.5);
}

#[tokio::test]
async fn missing_store_reviews_normalize_to_an_empty_list() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/locales/LIM-01/resenas");
            then.status(404).json_body(json!({"error": "Sin reseñas"}));
        })
        .await;

    let client = ReviewsClient::new(base(&server));
    assert!(client.store_reviews("LIM-01").await.unwrap().is_empty());
    assert_eq!(client.review_for_order("LIM-01", "p1").await.unwrap(), None);
}

#[tokio::test]
async fn cached_store_reviews_fetch_once_and_filter_by_order() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/locales/LIM-01/resenas");
            then.status(200).json_body(json!({"resenas": [
                {"resena_id": "r1", "local_id": "LIM-01", "pedido_id": "p1", "calificacion": 5},
                {"resena_id": "r2", "local_id": "LIM-01", "pedido_id": "p2", "calificacion": 3}
            ]}));
        })
        .await;

    let cached = CachedStoreReviews::new(ReviewsClient::new(base(&server)));

    let first = cached.review_for_order("LIM-01", "p1").await.unwrap();
    let second = cached.review_for_order("LIM-01", "p2").await.unwrap();
    let missing = cached.review_for_order("LIM-01", "p9").await.unwrap();

    assert_eq!(first.unwrap().review_id, "r1");
    assert_eq!(second.unwrap().review_id, "r2");
    assert_eq!(missing, None);
    assert_eq!(mock.hits_async().await, 1, "one listing serves every lookup");

    cached.invalidate_store("LIM-01");
    cached.review_for_order("LIM-01", "p1").await.unwrap();
    assert_eq!(mock.hits_async().await, 2, "invalidation forces a refetch");
}
