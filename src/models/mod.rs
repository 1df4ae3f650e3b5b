//! Data models returned by the explorer API.

mod document;
mod query;
mod topic;

pub use document::Document;
pub use query::{IncompletePair, Refinement, SortOrder};
pub use topic::Topic;

use serde::{Deserialize, Deserializer};

/// Accept an identifier emitted either as a JSON string or as an integer.
///
/// The backend serializes database row ids as numbers and topic indices as
/// integers, but the client only ever treats them as opaque keys.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Signed(n) => n.to_string(),
        RawId::Unsigned(n) => n.to_string(),
    })
}
