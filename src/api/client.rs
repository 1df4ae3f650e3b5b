//! HTTP implementation of the gateway.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::{ApiError, ApiRequest, Gateway};
use crate::config::{Settings, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::models::{Document, Refinement, Topic};

const USER_AGENT: &str = concat!("topic-explorer/", env!("CARGO_PKG_VERSION"));

/// Default request timeout, shared with [`Settings::default`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS);

/// Explorer API client. Build one per base URL and share it.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client with default timeout and user agent.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_options(base_url, DEFAULT_TIMEOUT, None)
    }

    /// Create a client from loaded settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, ApiError> {
        Self::with_options(
            &settings.base_url,
            settings.request_timeout(),
            settings.user_agent.as_deref(),
        )
    }

    /// Create a client with an explicit timeout and optional user agent.
    pub fn with_options(
        base_url: &str,
        timeout: Duration,
        user_agent: Option<&str>,
    ) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base_url)?;
        let client = Client::builder()
            .user_agent(user_agent.unwrap_or(USER_AGENT))
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self { client, base_url })
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a request.
    pub fn url_for(&self, request: &ApiRequest) -> String {
        format!("{}{}", self.base_url, request.target())
    }

    /// Issue one GET and parse the JSON body.
    ///
    /// The body is read as text first so that endpoints served with a
    /// non-JSON content type still parse.
    async fn get_json<T: DeserializeOwned>(&self, request: &ApiRequest) -> Result<T, ApiError> {
        let url = self.url_for(request);
        let start = Instant::now();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| {
                logged(ApiError::Transport {
                    url: url.clone(),
                    source,
                })
            })?;

        let status = response.status();
        debug!(
            %url,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "GET"
        );

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(logged(ApiError::status(&url, status, &body)));
        }

        let body = response
            .text()
            .await
            .map_err(|source| {
                logged(ApiError::Transport {
                    url: url.clone(),
                    source,
                })
            })?;

        serde_json::from_str(&body).map_err(|source| logged(ApiError::Parse { url, source }))
    }
}

#[async_trait]
impl Gateway for ApiClient {
    async fn list_documents(&self) -> Result<Vec<Document>, ApiError> {
        self.get_json(&ApiRequest::all_documents()).await
    }

    async fn search_documents(
        &self,
        term: &str,
        refinement: &Refinement,
    ) -> Result<Vec<Document>, ApiError> {
        self.get_json(&ApiRequest::search_documents(term, refinement)?)
            .await
    }

    async fn fetch_document(&self, id: &str) -> Result<Document, ApiError> {
        match self.get_json(&ApiRequest::document(id)?).await {
            Err(ApiError::Status { status, .. }) if status == StatusCode::NOT_FOUND => {
                Err(ApiError::NotFound(id.to_string()))
            }
            other => other,
        }
    }

    async fn topic_documents(
        &self,
        topic_id: &str,
        refinement: &Refinement,
    ) -> Result<Vec<Document>, ApiError> {
        self.get_json(&ApiRequest::topic_documents(topic_id, refinement)?)
            .await
    }

    async fn list_topics(&self) -> Result<Vec<Topic>, ApiError> {
        self.get_json(&ApiRequest::all_topics()).await
    }

    async fn search_topics(&self, query: &str) -> Result<Vec<Topic>, ApiError> {
        self.get_json(&ApiRequest::search_topics(query)?).await
    }

    async fn similar_documents(&self, document_id: &str) -> Result<Vec<Document>, ApiError> {
        self.get_json(&ApiRequest::similar_documents(document_id)?)
            .await
    }

    async fn similar_topics(&self, document_id: &str) -> Result<Vec<Topic>, ApiError> {
        self.get_json(&ApiRequest::similar_topics(document_id)?)
            .await
    }

    async fn allowed_sort_fields(&self) -> Result<Vec<String>, ApiError> {
        self.get_json(&ApiRequest::allowed_sort_fields()).await
    }

    async fn allowed_filter_fields(&self) -> Result<Vec<String>, ApiError> {
        self.get_json(&ApiRequest::allowed_filter_fields()).await
    }

    async fn top_region(&self) -> Result<Vec<String>, ApiError> {
        self.get_json(&ApiRequest::top_region()).await
    }

    async fn bottom_region(&self) -> Result<Vec<String>, ApiError> {
        self.get_json(&ApiRequest::bottom_region()).await
    }
}

/// Log a failed request and pass the error on.
fn logged(err: ApiError) -> ApiError {
    warn!(kind = err.kind(), error = %err, "request failed");
    err
}

/// Validate a base URL and strip the trailing slash.
///
/// A path prefix is kept, so `http://host/explorer/` yields request URLs
/// under `http://host/explorer/api/...`.
fn normalize_base_url(raw: &str) -> Result<String, ApiError> {
    let invalid = |reason: &str| ApiError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let parsed = Url::parse(raw.trim()).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(invalid("must not carry a query or fragment"));
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://localhost:5050").unwrap(),
            "http://localhost:5050"
        );
        assert_eq!(
            normalize_base_url("http://localhost:5050/").unwrap(),
            "http://localhost:5050"
        );
        assert_eq!(
            normalize_base_url("https://example.org/explorer/").unwrap(),
            "https://example.org/explorer"
        );
    }

    #[test]
    fn test_normalize_base_url_rejects() {
        assert!(normalize_base_url("localhost:5050").is_err());
        assert!(normalize_base_url("ftp://example.org").is_err());
        assert!(normalize_base_url("http://example.org/?x=1").is_err());
        assert!(normalize_base_url("").is_err());
    }

    #[test]
    fn test_default_timeout_matches_settings() {
        assert_eq!(DEFAULT_TIMEOUT, Settings::default().request_timeout());
    }

    #[test]
    fn test_url_for() {
        let client = ApiClient::new("http://127.0.0.1:5050/").unwrap();
        let req = ApiRequest::search_documents("climate", &Refinement::new()).unwrap();
        assert_eq!(
            client.url_for(&req),
            "http://127.0.0.1:5050/api/search?q=climate"
        );
        assert_eq!(client.base_url(), "http://127.0.0.1:5050");
    }

    #[tokio::test]
    async fn test_missing_id_rejected_before_request() {
        // Nothing listens on this port; a request would fail with Transport.
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        let err = client.fetch_document("").await.unwrap_err();
        assert!(matches!(err, ApiError::MissingParameter("document_id")));
    }
}
