//! Landing view: a search box and links to the other views.

use super::Route;

/// Landing page state. It fetches nothing.
#[derive(Debug, Clone, Default)]
pub struct HomeView {
    query: String,
}

impl HomeView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Where submitting the search box leads.
    pub fn submit(&self) -> Route {
        Route::Search {
            term: self.query.trim().to_string(),
        }
    }

    /// Static navigation entries.
    pub fn links() -> [(&'static str, Route); 2] {
        [
            (
                "Search documents",
                Route::Search {
                    term: String::new(),
                },
            ),
            ("Browse topics", Route::Browse),
        ]
    }
}
