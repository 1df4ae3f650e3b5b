//! Errors surfaced by the API gateway.

use reqwest::StatusCode;
use thiserror::Error;

/// Maximum number of body characters kept in a status error.
const BODY_EXCERPT_CHARS: usize = 200;

/// Errors that can occur while querying the explorer API.
///
/// An empty result set is never an error; list operations return an empty
/// vector for it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to reach the server (connection refused, timeout, reset).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// Server answered with a non-success status.
    #[error("{url} returned HTTP {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },
    /// Single-document lookup for an id the server does not know.
    #[error("document not found: {0}")]
    NotFound(String),
    /// Body was not the JSON shape we expected.
    #[error("malformed response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    /// A required identifier or search term was empty; no request was made.
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),
    /// The query was cancelled before it produced a result.
    #[error("query cancelled")]
    Cancelled,
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ApiError {
    pub(crate) fn status(url: &str, status: StatusCode, body: &str) -> Self {
        ApiError::Status {
            url: url.to_string(),
            status,
            body: excerpt(body),
        }
    }

    /// True for failures caused by the network or the server, as opposed to
    /// bad input on our side. These are the ones worth a retry button.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::Transport { .. } | ApiError::Status { .. } | ApiError::Parse { .. }
        )
    }

    /// Short machine-friendly name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Transport { .. } => "transport",
            ApiError::Status { .. } => "status",
            ApiError::NotFound(_) => "not_found",
            ApiError::Parse { .. } => "parse",
            ApiError::MissingParameter(_) => "missing_parameter",
            ApiError::Cancelled => "cancelled",
            ApiError::InvalidBaseUrl { .. } => "invalid_base_url",
            ApiError::Client(_) => "client",
        }
    }
}

/// Truncate a response body for error messages (UTF-8 safe).
fn excerpt(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(BODY_EXCERPT_CHARS) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_truncates_body() {
        let body = "x".repeat(500);
        let err = ApiError::status("http://h/api/docs", StatusCode::INTERNAL_SERVER_ERROR, &body);
        match &err {
            ApiError::Status { body, .. } => assert_eq!(body.len(), BODY_EXCERPT_CHARS + 3),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.is_retryable());
        assert_eq!(err.kind(), "status");
    }

    #[test]
    fn test_excerpt_multibyte() {
        let body = "é".repeat(BODY_EXCERPT_CHARS + 1);
        let cut = excerpt(&body);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), BODY_EXCERPT_CHARS + 3);
    }

    #[test]
    fn test_missing_parameter_not_retryable() {
        let err = ApiError::MissingParameter("doc_id");
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "missing required parameter: doc_id");
    }

    #[test]
    fn test_cancelled_kind() {
        let err = ApiError::Cancelled;
        assert_eq!(err.kind(), "cancelled");
        assert!(!err.is_retryable());
    }
}
