//! Documents belonging to one topic.

use std::sync::Arc;

use tracing::info;

use super::{Capabilities, Listing, Route};
use crate::api::Gateway;
use crate::fetch::LoadState;
use crate::models::{Document, IncompletePair, Refinement, SortOrder};
use crate::pagination::{Pager, TOPIC_PAGE_SIZE};

/// Topic detail page.
///
/// Unlike the search view, every change to the topic or to a refinement
/// re-fetches immediately. The previous request, if still in flight, is
/// cancelled so a slow response cannot overwrite the newer list.
pub struct TopicDocumentsView {
    gateway: Arc<dyn Gateway>,
    topic_id: String,
    label: Option<String>,
    documents: Listing<Document>,
    capabilities: Capabilities,
    refinement: Refinement,
}

impl TopicDocumentsView {
    pub const PAGE_SIZE: usize = TOPIC_PAGE_SIZE;

    pub fn mount(gateway: Arc<dyn Gateway>, topic_id: &str) -> Self {
        Self::mount_with(gateway, topic_id, Refinement::new())
    }

    /// Mount with an initial refinement (e.g. from command-line flags).
    pub fn mount_with(gateway: Arc<dyn Gateway>, topic_id: &str, refinement: Refinement) -> Self {
        let mut view = Self {
            gateway,
            topic_id: topic_id.to_string(),
            label: None,
            documents: Listing::new("topic_documents", Self::PAGE_SIZE),
            capabilities: Capabilities::new(),
            refinement,
        };
        info!(topic_id = %view.topic_id, "mounting topic documents view");
        view.refresh();
        view
    }

    /// Mount from a topic link, keeping the label it carries. Returns `None`
    /// for routes that do not point at a topic.
    pub fn open(gateway: Arc<dyn Gateway>, route: &Route) -> Option<Self> {
        match route {
            Route::TopicDocuments { topic_id, label } => {
                let mut view = Self::mount(gateway, topic_id);
                view.label = label.clone();
                Some(view)
            }
            _ => None,
        }
    }

    /// Set the label shown for the topic. Nothing is re-fetched.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Fetch the topic's documents with the current refinement, along with
    /// the allowed sort and filter fields.
    pub fn refresh(&mut self) {
        self.capabilities.load(&self.gateway);
        let gw = Arc::clone(&self.gateway);
        let topic_id = self.topic_id.clone();
        let refinement = self.refinement.clone();
        self.documents
            .issue(async move { gw.topic_documents(&topic_id, &refinement).await });
    }

    pub fn topic_id(&self) -> &str {
        &self.topic_id
    }

    /// Comma-joined topic terms, when the view was reached through a link.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Switch to another topic. The label is replaced along with the id.
    pub fn set_topic(&mut self, topic_id: &str, label: Option<&str>) {
        self.label = label.map(str::to_string);
        if self.topic_id == topic_id {
            return;
        }
        self.topic_id = topic_id.to_string();
        self.refresh();
    }

    pub fn set_sort(&mut self, field: &str) {
        self.refinement.sort = field.to_string();
        self.refresh();
    }

    pub fn set_order(&mut self, order: Option<SortOrder>) {
        self.refinement.order = order;
        self.refresh();
    }

    pub fn set_filter_field(&mut self, field: &str) {
        self.refinement.filter_field = field.to_string();
        self.refresh();
    }

    pub fn set_filter_input(&mut self, input: &str) {
        self.refinement.filter_input = input.to_string();
        self.refresh();
    }

    pub fn refinement(&self) -> &Refinement {
        &self.refinement
    }

    pub fn incomplete_pairs(&self) -> Vec<IncompletePair> {
        self.refinement.incomplete_pairs()
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

    pub async fn settled(&self) {
        self.capabilities.settled().await;
        self.documents.settled().await;
    }
}
