//! Topic browsing view.

use std::sync::Arc;

use tracing::info;

use super::{Listing, Route};
use crate::api::Gateway;
use crate::fetch::LoadState;
use crate::models::Topic;
use crate::pagination::{Pager, GLOBAL_PAGE_SIZE};

/// Browse page: every topic on mount, label search after submit.
pub struct BrowseView {
    gateway: Arc<dyn Gateway>,
    topics: Listing<Topic>,
    query: String,
}

impl BrowseView {
    pub const PAGE_SIZE: usize = GLOBAL_PAGE_SIZE;

    pub fn mount(gateway: Arc<dyn Gateway>) -> Self {
        let mut view = Self {
            gateway,
            topics: Listing::new("browse_topics", Self::PAGE_SIZE),
            query: String::new(),
        };
        info!("mounting browse view");
        view.list_all();
        view
    }

    fn list_all(&mut self) {
        let gw = Arc::clone(&self.gateway);
        self.topics.issue(async move { gw.list_topics().await });
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Search topic labels. A blank query lists every topic again.
    pub fn submit(&mut self) {
        if self.query.trim().is_empty() {
            self.list_all();
            return;
        }

        info!(query = %self.query, "searching topics");
        let gw = Arc::clone(&self.gateway);
        let query = self.query.clone();
        self.topics
            .issue(async move { gw.search_topics(&query).await });
    }

    pub fn retry(&mut self) {
        self.submit();
    }

    pub fn topics(&self) -> LoadState<Vec<Topic>> {
        self.topics.state()
    }

    pub fn current_page(&self) -> Vec<Topic> {
        self.topics.current_page()
    }

    /// Label and link for each topic on the current page.
    pub fn current_links(&self) -> Vec<(String, Route)> {
        self.current_page()
            .into_iter()
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

    pub fn page_count(&self) -> usize {
        self.topics.page_count()
    }

    pub fn pager(&self) -> &Pager {
        self.topics.pager()
    }

    pub fn set_page(&mut self, page: usize) {
        self.topics.set_page(page);
    }

    pub async fn settled(&self) {
        self.topics.settled().await;
    }
}
