//! Employees-service client: review CRUD.

use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Url};
use tracing::debug;
use wok_cache::RequestCache;
use wok_schemas::reviews::{CreateReviewRequest, UpdateReviewRequest};
use wok_schemas::Review;

use crate::endpoints::REQUEST_TIMEOUT;
use crate::error::ApiError;
use crate::normalize;

/// REST client for the employees service (reviews live there). No `Debug`:
/// the client may hold a bearer token.
#[derive(Clone)]
pub struct ReviewsClient {
    http: Client,
    base: Url,
    auth_token: Option<String>,
}

impl ReviewsClient {
    pub fn new(base: Url) -> Self {
        Self {
            http: Client::new(),
            base,
            auth_token: None,
        }
    }

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

    /// `POST /resenas`: one review per order.
    pub async fn create_review(
        &self,
        store_id: &str,
        order_id: &str,
        rating: f32,
        comment: &str,
    ) -> Result<Review, ApiError> {
        let request = CreateReviewRequest {
            store_id: store_id.to_string(),
            order_id: order_id.to_string(),
            rating,
            comment: comment.to_string(),
        };
        debug!(%store_id, %order_id, "creating review");

        let response = self
            .prepare(self.http.post(&self.endpoint("resenas")).json(&request))
            .send()
            .await
            .map_err(ApiError::transport)?;
        let body = normalize::read_json(response).await?;
        normalize::decode(normalize::unwrap_payload(body))
    }

    /// `PUT /resenas/{review_id}`.
    pub async fn update_review(
        &self,
        review_id: &str,
        rating: f32,
        comment: &str,
    ) -> Result<Review, ApiError> {
        let request = UpdateReviewRequest {
            rating,
            comment: comment.to_string(),
        };
        debug!(%review_id, "updating review");

        let response = self
            .prepare(
                self.http
                    .put(&self.endpoint(&format!("resenas/{review_id}")))
                    .json(&request),
            )
            .send()
            .await
            .map_err(ApiError::transport)?;
        let body = normalize::read_json(response).await?;
        normalize::decode(normalize::unwrap_payload(body))
    }

    /// `DELETE /resenas/{review_id}`.
    pub async fn delete_review(&self, review_id: &str) -> Result<(), ApiError> {
        debug!(%review_id, "deleting review");
        let response = self
            .prepare(
                self.http
                    .delete(&self.endpoint(&format!("resenas/{review_id}"))),
            )
            .send()
            .await
            .map_err(ApiError::transport)?;
        normalize::read_json(response).await.map(|_| ())
    }

    /// `GET /locales/{store_id}/resenas`: all reviews of one store.
    ///
    /// A 404 means "no reviews yet", not a failure.
    pub async fn store_reviews(&self, store_id: &str) -> Result<Vec<Review>, ApiError> {
        let url = self.endpoint(&format!("locales/{store_id}/resenas"));
        let response = self
            .prepare(self.http.get(&url))
            .send()
            .await
            .map_err(ApiError::transport)?;

        match normalize::read_json(response).await {
            Ok(body) => normalize::decode(normalize::unwrap_payload(body)),
            Err(ApiError::Status { code: 404, .. }) => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }

    /// The review for one order, if the customer left one. The service has
    /// no by-order route; this filters the store listing.
    pub async fn review_for_order(
        &self,
        store_id: &str,
        order_id: &str,
    ) -> Result<Option<Review>, ApiError> {
        let reviews = self.store_reviews(store_id).await?;
        Ok(reviews.into_iter().find(|r| r.order_id == order_id))
    }
}

// ---------------------------------------------------------------------------
// Cached store listings
// ---------------------------------------------------------------------------

/// Review-by-order lookups go through the full store listing; this wrapper
/// coalesces concurrent listings per store and serves repeats from cache.
/// `invalidate_store` after any mutation.
pub struct CachedStoreReviews {
    inner: ReviewsClient,
    cache: RequestCache<String, Arc<Vec<Review>>, ApiError>,
}

impl CachedStoreReviews {
    pub fn new(inner: ReviewsClient) -> Self {
        Self {
            inner,
            cache: RequestCache::new(),
        }
    }

    pub async fn store_reviews(&self, store_id: &str) -> Result<Arc<Vec<Review>>, ApiError> {
        let client = self.inner.clone();
        let key = store_id.to_string();
        let store = key.clone();
        self.cache
            .get_or_fetch(key, move || async move {
                client.store_reviews(&store).await.map(Arc::new)
            })
            .await
    }

    pub async fn review_for_order(
        &self,
        store_id: &str,
        order_id: &str,
    ) -> Result<Option<Review>, ApiError> {
        let reviews = self.store_reviews(store_id).await?;
        Ok(reviews.iter().find(|r| r.order_id == order_id).cloned())
    }

    /// Drop the cached listing for one store (after create/update/delete).
    pub fn invalidate_store(&self, store_id: &str) {
        self.cache.invalidate(&store_id.to_string());
    }

    /// Drop everything (session reset).
    pub fn clear(&self) {
        self.cache.clear();
    }
}
