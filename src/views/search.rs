//! Document search view.

use std::sync::Arc;

use tracing::info;

use super::{Capabilities, Listing};
use crate::api::Gateway;
use crate::fetch::LoadState;
use crate::models::{Document, IncompletePair, Refinement, SortOrder};
use crate::pagination::{Pager, GLOBAL_PAGE_SIZE};

/// Search page: all documents on mount, search results after submit.
///
/// Refinement setters only record the selection; nothing is fetched until
/// [`SearchView::submit`].
pub struct SearchView {
    gateway: Arc<dyn Gateway>,
    documents: Listing<Document>,
    capabilities: Capabilities,
    term: String,
    refinement: Refinement,
}

impl SearchView {
    pub const PAGE_SIZE: usize = GLOBAL_PAGE_SIZE;

    /// Create the view and start its initial fetches.
    pub fn mount(gateway: Arc<dyn Gateway>) -> Self {
        let mut view = Self {
            gateway,
            documents: Listing::new("search_documents", Self::PAGE_SIZE),
            capabilities: Capabilities::new(),
            term: String::new(),
            refinement: Refinement::new(),
        };
        info!("mounting search view");
        view.capabilities.load(&view.gateway);
        view.list_all();
        view
    }

    fn list_all(&mut self) {
        let gw = Arc::clone(&self.gateway);
        self.documents
            .issue(async move { gw.list_documents().await });
    }

    pub fn set_term(&mut self, term: &str) {
        self.term = term.to_string();
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn set_sort(&mut self, field: &str, order: Option<SortOrder>) {
        self.refinement.sort = field.to_string();
        self.refinement.order = order;
    }

    pub fn set_filter(&mut self, field: &str, input: &str) {
        self.refinement.filter_field = field.to_string();
        self.refinement.filter_input = input.to_string();
    }

    pub fn refinement(&self) -> &Refinement {
        &self.refinement
    }

    /// Half-filled sort/filter selections that the next search will ignore.
    pub fn incomplete_pairs(&self) -> Vec<IncompletePair> {
        self.refinement.incomplete_pairs()
    }

    /// Run the search for the current term. A blank term lists everything.
    pub fn submit(&mut self) {
        if self.term.trim().is_empty() {
            info!("empty search term, listing all documents");
            self.list_all();
            return;
        }

        info!(term = %self.term, "searching documents");
        let gw = Arc::clone(&self.gateway);
        let term = self.term.clone();
        let refinement = self.refinement.clone();
        self.documents
            .issue(async move { gw.search_documents(&term, &refinement).await });
    }

    /// Re-run the last query with the current inputs. Sort and filter
    /// field lists that failed to load are fetched again as well.
    pub fn retry(&mut self) {
        self.capabilities.reload_failed(&self.gateway);
        self.submit();
    }

    pub fn documents(&self) -> LoadState<Vec<Document>> {
        self.documents.state()
    }

    pub fn current_page(&self) -> Vec<Document> {
        self.documents.current_page()
    }

    pub fn page_count(&self) -> usize {
        self.documents.page_count()
    }

    pub fn pager(&self) -> &Pager {
        self.documents.pager()
    }

    pub fn set_page(&mut self, page: usize) {
        self.documents.set_page(page);
    }

    pub fn allowed_sort_fields(&self) -> LoadState<Vec<String>> {
        self.capabilities.sort_fields()
    }

    pub fn allowed_filter_fields(&self) -> LoadState<Vec<String>> {
        self.capabilities.filter_fields()
    }

    /// Wait until every query this view issued has settled.
    pub async fn settled(&self) {
        self.capabilities.settled().await;
        self.documents.settled().await;
    }
}
