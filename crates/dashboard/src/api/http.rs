//! HTTP implementation of [`TravelApi`] over reqwest.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::debug;
use url::Url;

use wanderhub_core::{BlogPostId, DestinationId, UserId};

use super::types::{
    AdminStatsEnvelope, BlogPost, Destination, DestinationPatch, Identity, NewDestination,
    NewReview, Review, UserRecord,
};
use super::{ApiError, TravelApi};
use crate::config::DashboardConfig;

/// REST client for the travel backend.
#[derive(Clone)]
pub struct HttpTravelClient {
    inner: Arc<HttpTravelClientInner>,
}

struct HttpTravelClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTravelClient {
    /// Create a new backend client from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build or the token cannot
    /// be encoded as a header value.
    pub fn new(config: &DashboardConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        if let Some(token) = &config.api_token {
            let value = format!("Bearer {}", token.expose_secret());
            let mut value = HeaderValue::from_str(&value)
                .map_err(|e| ApiError::Parse(format!("Invalid API token format: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(HttpTravelClientInner {
                client,
                base_url: config.api_url.clone(),
            }),
        })
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.inner
            .base_url
            .join(path)
            .map_err(|e| ApiError::Parse(format!("Invalid request path {path}: {e}")))
    }

    /// Execute a GET request against the backend.
    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.inner.client.get(self.url(path)?).send().await?;
        handle_response(response).await
    }

    /// Execute a POST request with a JSON body.
    async fn post<T: serde::de::DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .inner
            .client
            .post(self.url(path)?)
            .json(body)
            .send()
            .await?;
        handle_response(response).await
    }

    /// Execute a PUT request with a JSON body.
    async fn put<T: serde::de::DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .inner
            .client
            .put(self.url(path)?)
            .json(body)
            .send()
            .await?;
        handle_response(response).await
    }

    /// Execute a DELETE request; the backend returns no body on success.
    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.inner.client.delete(self.url(path)?).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        Err(parse_error(response).await)
    }

    /// Execute a bodyless POST, discarding any response body.
    async fn post_empty(&self, path: &str) -> Result<(), ApiError> {
        let response = self.inner.client.post(self.url(path)?).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        Err(parse_error(response).await)
    }
}

/// Parse a successful response body, or map the failure to a typed error.
async fn handle_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();

    if status.is_success() {
        return response
            .json()
            .await
            .map_err(|e| ApiError::Parse(format!("Failed to parse response: {e}")));
    }

    Err(parse_error(response).await)
}

/// Map an error response to a typed [`ApiError`], extracting the backend's
/// message when the body carries one.
async fn parse_error(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();

    if status == 401 || status == 403 {
        return ApiError::Unauthorized;
    }

    if status == 404 {
        return ApiError::NotFound("Resource not found".to_string());
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message_from_body(&body).unwrap_or(body);

    ApiError::Api { status, message }
}

/// Extract a human-readable message from a JSON error body.
///
/// The backend uses `{"message": "..."}`; some older endpoints return
/// `{"error": "..."}`.
fn error_message_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
}

#[async_trait]
impl TravelApi for HttpTravelClient {
    async fn current_user(&self) -> Option<Identity> {
        // Absence of a session is not an error; any failure reads as
        // "not authenticated".
        match self.get::<Identity>("auth/me").await {
            Ok(identity) => Some(identity),
            Err(e) => {
                debug!("No authenticated session: {e}");
                None
            }
        }
    }

    async fn refresh_admin_data(&self) -> Result<AdminStatsEnvelope, ApiError> {
        self.get("admin/statistics").await
    }

    async fn get_user_management_data(&self) -> Result<Vec<UserRecord>, ApiError> {
        self.get("admin/users").await
    }

    async fn get_destinations(&self) -> Result<Vec<Destination>, ApiError> {
        self.get("destinations").await
    }

    async fn get_blog_posts(&self) -> Result<Vec<BlogPost>, ApiError> {
        self.get("blog-posts").await
    }

    async fn create_destination(
        &self,
        destination: NewDestination,
    ) -> Result<Destination, ApiError> {
        self.post("destinations", &destination).await
    }

    async fn update_destination(
        &self,
        id: DestinationId,
        patch: DestinationPatch,
    ) -> Result<Destination, ApiError> {
        self.put(&format!("destinations/{id}"), &patch).await
    }

    async fn delete_destination(&self, id: DestinationId) -> Result<(), ApiError> {
        self.delete(&format!("destinations/{id}")).await
    }

    async fn delete_user(&self, id: UserId) -> Result<(), ApiError> {
        self.delete(&format!("admin/users/{id}")).await
    }

    async fn delete_blog_post(&self, id: BlogPostId) -> Result<(), ApiError> {
        self.delete(&format!("blog-posts/{id}")).await
    }

    async fn create_review(
        &self,
        destination: DestinationId,
        review: NewReview,
    ) -> Result<Review, ApiError> {
        self.post(&format!("destinations/{destination}/reviews"), &review)
            .await
    }

    async fn get_destination(&self, destination: DestinationId) -> Result<Destination, ApiError> {
        self.get(&format!("destinations/{destination}")).await
    }

    async fn sign_out(&self) -> Result<(), ApiError> {
        self.post_empty("auth/sign-out").await
    }
}

impl std::fmt::Debug for HttpTravelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTravelClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}
