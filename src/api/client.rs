use super::models::{
    Category, CategoryPayload, EntityId, EntityKind, Series, SeriesPayload,
};
use crate::util::validate_base_url;
use futures::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Address of the catalog API when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const MAX_RESPONSE_SIZE: usize = 2 * 1024 * 1024; // 2MB

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("Invalid response body: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// True for 404, so callers can log a missing record differently.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::HttpStatus(404))
    }
}

/// HTTP client for the catalog REST API.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference counted, so
/// each background request task gets its own handle.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl CatalogClient {
    /// Creates a client for `base_url` (e.g. `http://127.0.0.1:8000/api`).
    ///
    /// # Errors
    /// Returns `InvalidBaseUrl` for non-http(s) or malformed addresses, and
    /// `Network` if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url =
            validate_base_url(base_url).map_err(|e| ApiError::InvalidBaseUrl(e.to_string()))?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("catalog-admin/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(ApiError::Network)?;

        tracing::debug!(base_url = %base_url, timeout_ms = timeout.as_millis() as u64, "Catalog client created");

        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, kind: EntityKind) -> String {
        format!("{}/{}/", self.base_url, kind.collection_path())
    }

    fn item_url(&self, kind: EntityKind, id: EntityId) -> String {
        format!("{}/{}/{}/", self.base_url, kind.collection_path(), id)
    }

    // ------------------------------------------------------------------
    // Categories
    // ------------------------------------------------------------------

    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get_json(&self.collection_url(EntityKind::Category))
            .await
    }

    pub async fn get_category(&self, id: EntityId) -> Result<Category, ApiError> {
        self.get_json(&self.item_url(EntityKind::Category, id))
            .await
    }

    pub async fn create_category(&self, payload: &CategoryPayload) -> Result<(), ApiError> {
        self.send_json(
            Method::POST,
            &self.collection_url(EntityKind::Category),
            payload,
        )
        .await
    }

    pub async fn update_category(
        &self,
        id: EntityId,
        payload: &CategoryPayload,
    ) -> Result<(), ApiError> {
        self.send_json(
            Method::PUT,
            &self.item_url(EntityKind::Category, id),
            payload,
        )
        .await
    }

    pub async fn delete_category(&self, id: EntityId) -> Result<(), ApiError> {
        self.delete(&self.item_url(EntityKind::Category, id)).await
    }

    // ------------------------------------------------------------------
    // Series
    // ------------------------------------------------------------------

    pub async fn list_series(&self) -> Result<Vec<Series>, ApiError> {
        self.get_json(&self.collection_url(EntityKind::Series))
            .await
    }

    pub async fn get_series(&self, id: EntityId) -> Result<Series, ApiError> {
        self.get_json(&self.item_url(EntityKind::Series, id)).await
    }

    pub async fn create_series(&self, payload: &SeriesPayload) -> Result<(), ApiError> {
        self.send_json(
            Method::POST,
            &self.collection_url(EntityKind::Series),
            payload,
        )
        .await
    }

    pub async fn update_series(
        &self,
        id: EntityId,
        payload: &SeriesPayload,
    ) -> Result<(), ApiError> {
        self.send_json(Method::PUT, &self.item_url(EntityKind::Series, id), payload)
            .await
    }

    pub async fn delete_series(&self, id: EntityId) -> Result<(), ApiError> {
        self.delete(&self.item_url(EntityKind::Series, id)).await
    }

    // ------------------------------------------------------------------
    // Transport
    // ------------------------------------------------------------------

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let started = Instant::now();
        let request = self.http.get(url).header(ACCEPT, "application/json");
        let response = self.execute(request, &Method::GET, url).await?;

        // The deadline covers the body too: a server may send headers and stall.
        let remaining = self.timeout.saturating_sub(started.elapsed());
        let body = tokio::time::timeout(remaining, self.read_limited_body(response))
            .await
            .map_err(|_| {
                tracing::warn!(url, "API response body timed out");
                ApiError::Timeout(self.timeout)
            })??;
        serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(url, error = %e, "Failed to decode API response");
            ApiError::Decode(e)
        })
    }

    /// POST/PUT a JSON body. The response body is not needed by any screen,
    /// so only the status is checked.
    async fn send_json<B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: &B,
    ) -> Result<(), ApiError> {
        let body = serde_json::to_vec(body).map_err(ApiError::Encode)?;
        let request = self
            .http
            .request(method.clone(), url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body);
        self.execute(request, &method, url).await?;
        Ok(())
    }

    async fn delete(&self, url: &str) -> Result<(), ApiError> {
        let request = self.http.delete(url);
        self.execute(request, &Method::DELETE, url).await?;
        Ok(())
    }

    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        method: &Method,
        url: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let started = Instant::now();

        let response = tokio::time::timeout(self.timeout, request.send())
            .await
            .map_err(|_| {
                tracing::warn!(%method, url, "API request timed out");
                ApiError::Timeout(self.timeout)
            })?
            .map_err(|e| {
                tracing::warn!(%method, url, error = %e, "API request failed");
                self.transport_error(e)
            })?;

        let status = response.status();
        tracing::debug!(
            %method,
            url,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "API request completed"
        );

        if !status.is_success() {
            tracing::warn!(%method, url, status = status.as_u16(), "API returned error status");
            return Err(ApiError::HttpStatus(status.as_u16()));
        }

        Ok(response)
    }

    /// The client-wide deadline surfaces as a reqwest error; report it as a timeout.
    fn transport_error(&self, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            ApiError::Timeout(self.timeout)
        } else {
            ApiError::Network(e)
        }
    }

    async fn read_limited_body(&self, response: reqwest::Response) -> Result<Vec<u8>, ApiError> {
        if let Some(len) = response.content_length() {
            if len as usize > MAX_RESPONSE_SIZE {
                return Err(ApiError::ResponseTooLarge(MAX_RESPONSE_SIZE));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| self.transport_error(e))?;
            if bytes.len().saturating_add(chunk.len()) > MAX_RESPONSE_SIZE {
                return Err(ApiError::ResponseTooLarge(MAX_RESPONSE_SIZE));
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(bytes)
    }
}
