//! Headless page views.
//!
//! Each view owns its query state and the [`QuerySlot`]s for the data it
//! shows. Views never build URLs; they only talk to a [`Gateway`]. Any
//! change to an input that feeds a query re-issues that query and replaces
//! the previous result wholesale.

mod browse;
mod document;
mod home;
mod search;
mod topic_documents;

pub use browse::BrowseView;
pub use document::{DocumentView, Section, SIMILAR_GROUP_SIZE};
pub use home::HomeView;
pub use search::SearchView;
pub use topic_documents::TopicDocumentsView;

use std::future::Future;
use std::sync::Arc;

use crate::api::{ApiError, Gateway};
use crate::fetch::{LoadState, QuerySlot};
use crate::pagination::Pager;

/// Navigation targets and cross-links between views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Search { term: String },
    Browse,
    Document { id: String },
    /// A topic's documents. The label travels with the link so the target
    /// view can show it without another fetch; it is not part of the path.
    TopicDocuments {
        topic_id: String,
        label: Option<String>,
    },
}

impl Route {
    /// Path used for links, with ids percent-encoded.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Search { term } if term.is_empty() => "/search".to_string(),
            Route::Search { term } => format!("/search?q={}", urlencoding::encode(term)),
            Route::Browse => "/browse".to_string(),
            Route::Document { id } => format!("/document/{}", urlencoding::encode(id)),
            Route::TopicDocuments { topic_id, .. } => {
                format!("/documents/{}", urlencoding::encode(topic_id))
            }
        }
    }
}

/// A fetched list plus the page currently shown.
pub(crate) struct Listing<T> {
    slot: QuerySlot<Vec<T>>,
    pager: Pager,
}

impl<T> Listing<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub(crate) fn new(name: &'static str, page_size: usize) -> Self {
        Self {
            slot: QuerySlot::new(name),
            pager: Pager::new(page_size),
        }
    }

    /// Replace the list with a fresh query and go back to page 1.
    pub(crate) fn issue<F>(&mut self, query: F)
    where
        F: Future<Output = Result<Vec<T>, ApiError>> + Send + 'static,
    {
        self.pager.reset();
        self.slot.issue(query);
    }

    pub(crate) fn state(&self) -> LoadState<Vec<T>> {
        self.slot.state()
    }

    pub(crate) async fn settled(&self) -> LoadState<Vec<T>> {
        self.slot.settled().await
    }

    pub(crate) fn current_page(&self) -> Vec<T> {
        self.pager.slice(self.slot.state().items()).to_vec()
    }

    pub(crate) fn page_count(&self) -> usize {
        self.pager.page_count(self.slot.state().items().len())
    }

    pub(crate) fn pager(&self) -> &Pager {
        &self.pager
    }

    pub(crate) fn set_page(&mut self, page: usize) {
        self.pager.set_page(page);
    }
}

/// Sort and filter fields the backend currently allows.
pub(crate) struct Capabilities {
    sort: QuerySlot<Vec<String>>,
    filter: QuerySlot<Vec<String>>,
}

impl Capabilities {
    pub(crate) fn new() -> Self {
        Self {
            sort: QuerySlot::new("allowed_sort"),
            filter: QuerySlot::new("allowed_filter"),
        }
    }

    /// Fetch both lists fresh.
    pub(crate) fn load(&mut self, gateway: &Arc<dyn Gateway>) {
        let gw = Arc::clone(gateway);
        self.sort
            .issue(async move { gw.allowed_sort_fields().await });
        let gw = Arc::clone(gateway);
        self.filter
            .issue(async move { gw.allowed_filter_fields().await });
    }

    /// Re-fetch whichever list failed. Loaded lists are left alone.
    pub(crate) fn reload_failed(&mut self, gateway: &Arc<dyn Gateway>) {
        if self.sort.state().error().is_some() {
            let gw = Arc::clone(gateway);
            self.sort
                .issue(async move { gw.allowed_sort_fields().await });
        }
        if self.filter.state().error().is_some() {
            let gw = Arc::clone(gateway);
            self.filter
                .issue(async move { gw.allowed_filter_fields().await });
        }
    }

    pub(crate) fn sort_fields(&self) -> LoadState<Vec<String>> {
        self.sort.state()
    }

    pub(crate) fn filter_fields(&self) -> LoadState<Vec<String>> {
        self.filter.state()
    }

    pub(crate) async fn settled(&self) {
        self.sort.settled().await;
        self.filter.settled().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Home.path(), "/");
        assert_eq!(Route::Browse.path(), "/browse");
        assert_eq!(
            Route::Search {
                term: String::new()
            }
            .path(),
            "/search"
        );
        assert_eq!(
            Route::Search {
                term: "sea ice".into()
            }
            .path(),
            "/search?q=sea%20ice"
        );
        assert_eq!(Route::Document { id: "12".into() }.path(), "/document/12");
        assert_eq!(
            Route::TopicDocuments {
                topic_id: "a/b".into(),
                label: Some("ice, sea".into()),
            }
            .path(),
            "/documents/a%2Fb"
        );
    }
}
