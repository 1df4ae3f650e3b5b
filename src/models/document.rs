//! Document records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A bibliographic record with an opaque id and an open metadata mapping.
///
/// The set of metadata fields is decided by the server. `title`, `author`,
/// `abstract`, `year` and `URI` are the ones usually present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            metadata: Map::new(),
        }
    }

    /// Builder-style helper to attach a metadata field.
    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(name.to_string(), value.into());
        self
    }

    /// Get a metadata field as display text.
    ///
    /// Strings are returned verbatim, scalars as their JSON text. Null and
    /// missing fields yield `None`.
    pub fn field(&self, name: &str) -> Option<String> {
        match self.metadata.get(name)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn title(&self) -> Option<String> {
        self.field("title")
    }

    pub fn author(&self) -> Option<String> {
        self.field("author")
    }

    /// Title for list rendering, falling back to the id.
    pub fn display_title(&self) -> String {
        self.title().unwrap_or_else(|| format!("Document {}", self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_numeric_id() {
        let doc: Document =
            serde_json::from_str(r#"{"id": 42, "metadata": {"title": "Rain"}}"#).unwrap();
        assert_eq!(doc.id, "42");
        assert_eq!(doc.title().as_deref(), Some("Rain"));
    }

    #[test]
    fn test_deserialize_string_id_without_metadata() {
        let doc: Document = serde_json::from_str(r#"{"id": "W-17"}"#).unwrap();
        assert_eq!(doc.id, "W-17");
        assert!(doc.metadata.is_empty());
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let result: Result<Document, _> = serde_json::from_str(r#"{"metadata": {}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_field_rendering() {
        let doc = Document::new("1")
            .with_field("year", 2019)
            .with_field("author", "Doe, Jane")
            .with_field("URI", Value::Null);

        assert_eq!(doc.field("year").as_deref(), Some("2019"));
        assert_eq!(doc.author().as_deref(), Some("Doe, Jane"));
        assert_eq!(doc.field("URI"), None);
        assert_eq!(doc.field("abstract"), None);
    }

    #[test]
    fn test_display_title_falls_back_to_id() {
        assert_eq!(Document::new("9").display_title(), "Document 9");
    }
}
