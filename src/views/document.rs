//! Document detail view.

use std::sync::Arc;

use tracing::info;

use super::Route;
use crate::api::{ApiError, Gateway};
use crate::fetch::{LoadState, QuerySlot};
use crate::models::{Document, Topic};

/// Similar documents are shown in groups of this many.
pub const SIMILAR_GROUP_SIZE: usize = 4;

/// A titled block of document metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Upper-cased field name.
    pub heading: String,
    pub body: Option<String>,
}

/// Document detail page.
///
/// Five independent fetches are issued on mount. Each settles on its own;
/// there is no barrier between them.
pub struct DocumentView {
    gateway: Arc<dyn Gateway>,
    document_id: String,
    document: QuerySlot<Document>,
    similar_topics: QuerySlot<Vec<Topic>>,
    similar_documents: QuerySlot<Vec<Document>>,
    top_region: QuerySlot<Vec<String>>,
    bottom_region: QuerySlot<Vec<String>>,
}

impl DocumentView {
    pub fn mount(gateway: Arc<dyn Gateway>, document_id: &str) -> Self {
        let mut view = Self {
            gateway,
            document_id: document_id.to_string(),
            document: QuerySlot::new("document"),
            similar_topics: QuerySlot::new("similar_topics"),
            similar_documents: QuerySlot::new("similar_documents"),
            top_region: QuerySlot::new("top_region"),
            bottom_region: QuerySlot::new("bottom_region"),
        };
        info!(document_id = %view.document_id, "mounting document view");
        view.load();
        view
    }

    fn load(&mut self) {
        let id = self.document_id.clone();

        let gw = Arc::clone(&self.gateway);
        let doc_id = id.clone();
        self.document
            .issue(async move { gw.fetch_document(&doc_id).await });

        let gw = Arc::clone(&self.gateway);
        let doc_id = id.clone();
        self.similar_topics
            .issue(async move { gw.similar_topics(&doc_id).await });

        let gw = Arc::clone(&self.gateway);
        self.similar_documents
            .issue(async move { gw.similar_documents(&id).await });

        let gw = Arc::clone(&self.gateway);
        self.top_region.issue(async move { gw.top_region().await });

        let gw = Arc::clone(&self.gateway);
        self.bottom_region
            .issue(async move { gw.bottom_region().await });
    }

    /// Navigate to another document. All five queries restart.
    pub fn set_document(&mut self, document_id: &str) {
        if self.document_id == document_id {
            return;
        }
        self.document_id = document_id.to_string();
        self.load();
    }

    pub fn retry(&mut self) {
        self.load();
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    /// True until the document, both regions and the similar topics have
    /// settled. Similar documents fill in on their own and do not gate.
    pub fn is_loading(&self) -> bool {
        self.document.is_loading()
            || self.top_region.is_loading()
            || self.bottom_region.is_loading()
            || self.similar_topics.is_loading()
    }

    pub fn document(&self) -> LoadState<Document> {
        self.document.state()
    }

    pub fn similar_topics(&self) -> LoadState<Vec<Topic>> {
        self.similar_topics.state()
    }

    pub fn similar_documents(&self) -> LoadState<Vec<Document>> {
        self.similar_documents.state()
    }

    pub fn top_region(&self) -> LoadState<Vec<String>> {
        self.top_region.state()
    }

    pub fn bottom_region(&self) -> LoadState<Vec<String>> {
        self.bottom_region.state()
    }

    /// Values of the top-region fields, in region order. Fields the document
    /// lacks are skipped.
    pub fn header_lines(&self) -> Vec<String> {
        let document = self.document.state();
        let Some(document) = document.loaded() else {
            return Vec::new();
        };
        let region = self.top_region.state();
        region
            .items()
            .iter()
            .filter_map(|field| document.field(field))
            .collect()
    }

    /// Display regions whose query failed, by name. Header lines and
    /// sections are empty for a failed region, so front ends report these.
    pub fn failed_regions(&self) -> Vec<(&'static str, Arc<ApiError>)> {
        [
            ("top region", self.top_region.state()),
            ("bottom region", self.bottom_region.state()),
        ]
        .into_iter()
        .filter_map(|(name, state)| match state {
            LoadState::Failed(err) => Some((name, err)),
            _ => None,
        })
        .collect()
    }

    /// One section per bottom-region field, headed by the upper-cased name.
    pub fn sections(&self) -> Vec<Section> {
        let document = self.document.state();
        let Some(document) = document.loaded() else {
            return Vec::new();
        };
        let region = self.bottom_region.state();
        region
            .items()
            .iter()
            .map(|field| Section {
                heading: field.to_uppercase(),
                body: document.field(field),
            })
            .collect()
    }

    /// Label and link for each similar topic.
    pub fn similar_topic_links(&self) -> Vec<(String, Route)> {
        self.similar_topics
            .state()
            .items()
            .iter()
            .map(|topic| {
                let label = topic.label();
                let route = Route::TopicDocuments {
                    topic_id: topic.id.clone(),
                    label: Some(label.clone()),
                };
                (label, route)
            })
            .collect()
    }

    /// Similar documents in groups of [`SIMILAR_GROUP_SIZE`], backend order.
    pub fn similar_document_groups(&self) -> Vec<Vec<Document>> {
        self.similar_documents
            .state()
            .items()
            .chunks(SIMILAR_GROUP_SIZE)
            .map(<[Document]>::to_vec)
            .collect()
    }

    /// Wait for all five queries.
    pub async fn settled(&self) {
        futures::join!(
            self.document.settled(),
            self.similar_topics.settled(),
            self.similar_documents.settled(),
            self.top_region.settled(),
            self.bottom_region.settled()
        );
    }
}
