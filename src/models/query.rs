//! Client-side query refinement state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sort direction accepted by the listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("unknown sort order '{}' (expected asc or desc)", other)),
        }
    }
}

/// A refinement pair that was only half filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncompletePair {
    /// Sort field without an order, or the other way round.
    Sort,
    /// Filter field without filter text, or the other way round.
    Filter,
}

/// Optional sort and filter selections for document listings.
///
/// Both pairs are gated: a pair is only sent when both of its halves are
/// set. A half-filled pair is dropped from the request without error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Refinement {
    pub sort: String,
    pub order: Option<SortOrder>,
    pub filter_field: String,
    pub filter_input: String,
}

impl Refinement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sort(mut self, field: &str, order: Option<SortOrder>) -> Self {
        self.sort = field.to_string();
        self.order = order;
        self
    }

    pub fn filter(mut self, field: &str, input: &str) -> Self {
        self.filter_field = field.to_string();
        self.filter_input = input.to_string();
        self
    }

    /// The sort pair, if both halves are present.
    pub fn sort_pair(&self) -> Option<(&str, SortOrder)> {
        match self.order {
            Some(order) if !self.sort.is_empty() => Some((self.sort.as_str(), order)),
            _ => None,
        }
    }

    /// The filter pair, if both halves are present.
    pub fn filter_pair(&self) -> Option<(&str, &str)> {
        if self.filter_field.is_empty() || self.filter_input.is_empty() {
            return None;
        }
        Some((self.filter_field.as_str(), self.filter_input.as_str()))
    }

    /// Pairs with exactly one half set. These are silently left out of
    /// requests; front ends may use this to show a hint.
    pub fn incomplete_pairs(&self) -> Vec<IncompletePair> {
        let mut pairs = Vec::new();
        if self.sort.is_empty() != self.order.is_none() {
            pairs.push(IncompletePair::Sort);
        }
        if self.filter_field.is_empty() != self.filter_input.is_empty() {
            pairs.push(IncompletePair::Filter);
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_parse() {
        assert_eq!("asc".parse::<SortOrder>(), Ok(SortOrder::Asc));
        assert_eq!("DESC".parse::<SortOrder>(), Ok(SortOrder::Desc));
        assert!("sideways".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_pairs_require_both_halves() {
        let r = Refinement::new().sort("year", None).filter("author", "");
        assert_eq!(r.sort_pair(), None);
        assert_eq!(r.filter_pair(), None);

        let r = Refinement::new()
            .sort("year", Some(SortOrder::Desc))
            .filter("author", "smith");
        assert_eq!(r.sort_pair(), Some(("year", SortOrder::Desc)));
        assert_eq!(r.filter_pair(), Some(("author", "smith")));
    }

    #[test]
    fn test_incomplete_pairs() {
        assert!(Refinement::new().incomplete_pairs().is_empty());

        let r = Refinement::new()
            .sort("", Some(SortOrder::Asc))
            .filter("author", "");
        assert_eq!(
            r.incomplete_pairs(),
            vec![IncompletePair::Sort, IncompletePair::Filter]
        );

        let r = Refinement::new().sort("year", Some(SortOrder::Asc));
        assert!(r.incomplete_pairs().is_empty());
    }
}
