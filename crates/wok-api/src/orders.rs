//! Orders-service client.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use tracing::debug;
use wok_schemas::{CreateOrderRequest, OrderAck, OrderDetails, OrderSummary, Page};

use crate::endpoints::REQUEST_TIMEOUT;
use crate::error::ApiError;
use crate::normalize;

/// The slice of the orders service the live tracker needs. A trait seam so
/// tracker tests can run without a backend.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// `GET /locales/{store_id}/pedidos/{order_id}`: order, status history,
    /// awaiting-confirmation flag.
    async fn order_detail(&self, store_id: &str, order_id: &str)
        -> Result<OrderDetails, ApiError>;

    /// `POST /pedidos/{order_id}/confirmar`: tell the backend the customer
    /// has the order. Success carries no state; the canonical transition
    /// arrives over the notification stream.
    async fn confirm_delivery(
        &self,
        order_id: &str,
        user_email: &str,
        store_id: &str,
    ) -> Result<(), ApiError>;
}

/// REST client for the orders service. No `Debug`: the client may hold a
/// bearer token.
#[derive(Clone)]
pub struct OrdersClient {
    http: Client,
    base: Url,
    auth_token: Option<String>,
}

impl OrdersClient {
    pub fn new(base: Url) -> Self {
        Self {
            http: Client::new(),
            base,
            auth_token: None,
        }
    }

    /// Attach a bearer token to every request.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base.as_str().trim_end_matches('/'), path)
    }

    fn prepare(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.timeout(REQUEST_TIMEOUT);
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// `POST /pedidos`: place an order.
    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<OrderAck, ApiError> {
        let url = self.endpoint("pedidos");
        debug!(store_id = %request.store_id, "creating order");

        let response = self
            .prepare(self.http.post(&url).json(request))
            .send()
            .await
            .map_err(ApiError::transport)?;
        let body = normalize::read_json(response).await?;
        normalize::decode(normalize::unwrap_payload(body))
    }

    /// `GET /pedidos?usuario_correo=…&page=…&limit=…`: the user's orders.
    pub async fn list_orders(
        &self,
        user_email: &str,
        page: u32,
        limit: u32,
    ) -> Result<Page<OrderSummary>, ApiError> {
        let url = self.endpoint("pedidos");
        let response = self
            .prepare(self.http.get(&url).query(&[
                ("usuario_correo", user_email),
                ("page", &page.to_string()),
                ("limit", &limit.to_string()),
            ]))
            .send()
            .await
            .map_err(ApiError::transport)?;
        let body = normalize::read_json(response).await?;
        normalize::into_page(body, page, limit)
    }
}

#[async_trait]
impl OrderGateway for OrdersClient {
    async fn order_detail(
        &self,
        store_id: &str,
        order_id: &str,
    ) -> Result<OrderDetails, ApiError> {
        let url = self.endpoint(&format!("locales/{store_id}/pedidos/{order_id}"));
        debug!(%store_id, %order_id, "fetching order detail");

        let response = self
            .prepare(self.http.get(&url))
            .send()
            .await
            .map_err(ApiError::transport)?;
        let body = normalize::read_json(response).await?;
        normalize::decode(normalize::unwrap_payload(body))
    }

    async fn confirm_delivery(
        &self,
        order_id: &str,
        user_email: &str,
        store_id: &str,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("pedidos/{order_id}/confirmar"));
        debug!(%order_id, "confirming delivery");

        let response = self
            .prepare(self.http.post(&url).json(&serde_json::json!({
                "usuario_correo": user_email,
                "local_id": store_id,
            })))
            .send()
            .await
            .map_err(ApiError::transport)?;

        // Success carries no payload worth keeping; error statuses still get
        // the backend's message extracted.
        normalize::read_json(response).await.map(|_| ())
    }
}
