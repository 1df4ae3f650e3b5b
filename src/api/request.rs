//! Request targets for every gateway operation.
//!
//! Builders validate required inputs and return an [`ApiRequest`]: a path
//! plus ordered query pairs. Values are kept raw and percent-encoded only
//! when [`ApiRequest::target`] renders the request line, so tests can
//! inspect both forms.

use super::ApiError;
use crate::models::Refinement;

pub const DOCS_PATH: &str = "/api/docs";
pub const SEARCH_PATH: &str = "/api/search";
pub const DOCUMENT_PATH: &str = "/api/document";
pub const TOPIC_DOCS_PATH: &str = "/api/get_topic_docs";
pub const ALL_LABELS_PATH: &str = "/api/get_all_labels";
pub const LABELS_PATH: &str = "/api/labels";
pub const SIMILAR_DOCUMENTS_PATH: &str = "/api/get_similar_documents";
pub const SIMILAR_TOPICS_PATH: &str = "/api/get_similar_topics";
pub const ALLOW_SORT_PATH: &str = "/api/get_allow_sort";
pub const ALLOW_FILTER_PATH: &str = "/api/get_allow_filter";
pub const TOP_REGION_PATH: &str = "/api/get_top_region";
pub const BOTTOM_REGION_PATH: &str = "/api/get_bottom_region";

/// A GET request relative to the API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    path: String,
    query: Vec<(&'static str, String)>,
}

impl ApiRequest {
    fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    fn param(mut self, key: &'static str, value: &str) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// Append the sort and filter pairs that are complete.
    fn refine(mut self, refinement: &Refinement) -> Self {
        if let Some((field, order)) = refinement.sort_pair() {
            self = self.param("sort", field).param("order", order.as_str());
        }
        if let Some((field, input)) = refinement.filter_pair() {
            self = self
                .param("filter_field", field)
                .param("filter_input", input);
        }
        self
    }

    /// Encoded path, without the query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Raw (unencoded) query pairs in the order they are sent.
    pub fn query_pairs(&self) -> &[(&'static str, String)] {
        &self.query
    }

    /// Look up a raw query value by key.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Path and percent-encoded query string, e.g. `/api/search?q=climate`.
    pub fn target(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path, query)
    }

    pub fn all_documents() -> Self {
        Self::new(DOCS_PATH)
    }

    pub fn search_documents(term: &str, refinement: &Refinement) -> Result<Self, ApiError> {
        let term = required(term, "q")?;
        Ok(Self::new(SEARCH_PATH).param("q", term).refine(refinement))
    }

    /// Single document lookup. The id becomes one encoded path segment.
    pub fn document(id: &str) -> Result<Self, ApiError> {
        let id = required(id, "document_id")?;
        Ok(Self::new(format!(
            "{}/{}",
            DOCUMENT_PATH,
            urlencoding::encode(id)
        )))
    }

    pub fn topic_documents(topic_id: &str, refinement: &Refinement) -> Result<Self, ApiError> {
        let topic_id = required(topic_id, "topic_id")?;
        Ok(Self::new(TOPIC_DOCS_PATH)
            .param("topic_id", topic_id)
            .refine(refinement))
    }

    pub fn all_topics() -> Self {
        Self::new(ALL_LABELS_PATH)
    }

    pub fn search_topics(query: &str) -> Result<Self, ApiError> {
        let query = required(query, "topic_query")?;
        Ok(Self::new(LABELS_PATH).param("topic_query", query))
    }

    pub fn similar_documents(document_id: &str) -> Result<Self, ApiError> {
        let document_id = required(document_id, "doc_id")?;
        Ok(Self::new(SIMILAR_DOCUMENTS_PATH).param("doc_id", document_id))
    }

    pub fn similar_topics(document_id: &str) -> Result<Self, ApiError> {
        let document_id = required(document_id, "doc_id")?;
        Ok(Self::new(SIMILAR_TOPICS_PATH).param("doc_id", document_id))
    }

    pub fn allowed_sort_fields() -> Self {
        Self::new(ALLOW_SORT_PATH)
    }

    pub fn allowed_filter_fields() -> Self {
        Self::new(ALLOW_FILTER_PATH)
    }

    pub fn top_region() -> Self {
        Self::new(TOP_REGION_PATH)
    }

    pub fn bottom_region() -> Self {
        Self::new(BOTTOM_REGION_PATH)
    }
}

/// Reject empty or whitespace-only required values before any I/O.
fn required<'a>(value: &'a str, name: &'static str) -> Result<&'a str, ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::MissingParameter(name));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SortOrder;

    #[test]
    fn test_search_without_refinement() {
        let req = ApiRequest::search_documents("climate", &Refinement::new()).unwrap();
        assert_eq!(req.target(), "/api/search?q=climate");
    }

    #[test]
    fn test_search_with_sort() {
        let refinement = Refinement::new().sort("year", Some(SortOrder::Asc));
        let req = ApiRequest::search_documents("climate", &refinement).unwrap();
        assert_eq!(req.target(), "/api/search?q=climate&sort=year&order=asc");
    }

    #[test]
    fn test_search_with_sort_and_filter() {
        let refinement = Refinement::new()
            .sort("year", Some(SortOrder::Desc))
            .filter("author", "smith");
        let req = ApiRequest::search_documents("climate", &refinement).unwrap();
        assert_eq!(
            req.target(),
            "/api/search?q=climate&sort=year&order=desc&filter_field=author&filter_input=smith"
        );
    }

    #[test]
    fn test_half_pairs_equal_no_refinement() {
        let bare = ApiRequest::search_documents("climate", &Refinement::new()).unwrap();

        let half_sort = Refinement::new().sort("year", None);
        let half_order = Refinement::new().sort("", Some(SortOrder::Asc));
        let half_filter = Refinement::new().filter("author", "");
        let half_input = Refinement::new().filter("", "smith");

        for refinement in [half_sort, half_order, half_filter, half_input] {
            let req = ApiRequest::search_documents("climate", &refinement).unwrap();
            assert_eq!(req, bare, "refinement {:?} leaked into request", refinement);
        }
    }

    #[test]
    fn test_topic_documents_drops_filter_without_text() {
        let refinement = Refinement::new().filter("author", "");
        let req = ApiRequest::topic_documents("7", &refinement).unwrap();
        assert_eq!(req.target(), "/api/get_topic_docs?topic_id=7");
        assert_eq!(req.query_value("filter_field"), None);
        assert_eq!(req.query_value("filter_input"), None);
    }

    #[test]
    fn test_reserved_characters_are_encoded() {
        let refinement = Refinement::new().filter("title", "a&b #1");
        let req = ApiRequest::search_documents("rock & roll", &refinement).unwrap();
        assert_eq!(
            req.target(),
            "/api/search?q=rock%20%26%20roll&filter_field=title&filter_input=a%26b%20%231"
        );
        assert_eq!(req.query_value("q"), Some("rock & roll"));
    }

    #[test]
    fn test_document_id_is_one_encoded_segment() {
        let req = ApiRequest::document("12").unwrap();
        assert_eq!(req.target(), "/api/document/12");

        let req = ApiRequest::document("a/b?c#d").unwrap();
        assert_eq!(req.path(), "/api/document/a%2Fb%3Fc%23d");
        assert_eq!(req.path().matches("a%2Fb%3Fc%23d").count(), 1);
        assert!(req.query_pairs().is_empty());
    }

    #[test]
    fn test_required_inputs_rejected() {
        assert!(matches!(
            ApiRequest::document(""),
            Err(ApiError::MissingParameter("document_id"))
        ));
        assert!(matches!(
            ApiRequest::topic_documents("  ", &Refinement::new()),
            Err(ApiError::MissingParameter("topic_id"))
        ));
        assert!(matches!(
            ApiRequest::search_documents("", &Refinement::new()),
            Err(ApiError::MissingParameter("q"))
        ));
        assert!(matches!(
            ApiRequest::similar_topics(""),
            Err(ApiError::MissingParameter("doc_id"))
        ));
    }

    #[test]
    fn test_fixed_endpoints() {
        assert_eq!(ApiRequest::all_documents().target(), "/api/docs");
        assert_eq!(ApiRequest::all_topics().target(), "/api/get_all_labels");
        assert_eq!(ApiRequest::allowed_sort_fields().target(), "/api/get_allow_sort");
        assert_eq!(
            ApiRequest::allowed_filter_fields().target(),
            "/api/get_allow_filter"
        );
        assert_eq!(ApiRequest::top_region().target(), "/api/get_top_region");
        assert_eq!(ApiRequest::bottom_region().target(), "/api/get_bottom_region");
        assert_eq!(
            ApiRequest::search_topics("heat wave").unwrap().target(),
            "/api/labels?topic_query=heat%20wave"
        );
        assert_eq!(
            ApiRequest::similar_documents("5").unwrap().target(),
            "/api/get_similar_documents?doc_id=5"
        );
    }
}
