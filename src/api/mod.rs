//! Document/topic query gateway.
//!
//! Turns search, sort, filter and lookup intent into read-only GET requests
//! against the explorer backend and returns typed results. Views depend on
//! the [`Gateway`] trait; [`ApiClient`] is the HTTP implementation.

mod client;
mod error;
mod request;

pub use client::{ApiClient, DEFAULT_TIMEOUT};
pub use error::ApiError;
pub use request::ApiRequest;

use async_trait::async_trait;

use crate::models::{Document, Refinement, Topic};

/// Read-only operations offered by the explorer backend.
///
/// Each call performs exactly one request. Empty result sets are `Ok` with
/// an empty vector; failures are `Err`.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Every document the backend is willing to list.
    async fn list_documents(&self) -> Result<Vec<Document>, ApiError>;

    /// Full-text search. `term` must not be empty.
    async fn search_documents(
        &self,
        term: &str,
        refinement: &Refinement,
    ) -> Result<Vec<Document>, ApiError>;

    /// Single document by id. Unknown ids yield [`ApiError::NotFound`].
    async fn fetch_document(&self, id: &str) -> Result<Document, ApiError>;

    /// Documents belonging to a topic.
    async fn topic_documents(
        &self,
        topic_id: &str,
        refinement: &Refinement,
    ) -> Result<Vec<Document>, ApiError>;

    async fn list_topics(&self) -> Result<Vec<Topic>, ApiError>;

    /// Topics whose label matches a query.
    async fn search_topics(&self, query: &str) -> Result<Vec<Topic>, ApiError>;

    /// Documents similar to the given one, in backend ranking order.
    async fn similar_documents(&self, document_id: &str) -> Result<Vec<Document>, ApiError>;

    async fn similar_topics(&self, document_id: &str) -> Result<Vec<Topic>, ApiError>;

    /// Metadata fields the backend currently allows sorting on.
    async fn allowed_sort_fields(&self) -> Result<Vec<String>, ApiError>;

    /// Metadata fields the backend currently allows filtering on.
    async fn allowed_filter_fields(&self) -> Result<Vec<String>, ApiError>;

    /// Metadata fields shown at the top of the document detail view.
    async fn top_region(&self) -> Result<Vec<String>, ApiError>;

    /// Metadata fields shown as titled sections on the detail view.
    async fn bottom_region(&self) -> Result<Vec<String>, ApiError>;
}
