//! Topic labels.

use serde::{Deserialize, Serialize};

/// A labeled cluster of terms produced by the topic model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    #[serde(deserialize_with = "super::deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub topic_list: Vec<String>,
}

impl Topic {
    pub fn new(id: impl Into<String>, terms: &[&str]) -> Self {
        Self {
            id: id.into(),
            topic_list: terms.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Comma-joined label used wherever a topic is shown.
    pub fn label(&self) -> String {
        self.topic_list.join(", ")
    }
}
