//! Command-line front end.
//!
//! Each subcommand mounts the matching view, waits for its queries to
//! settle and prints the requested page.

mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::api::{ApiClient, Gateway};
use crate::config::{load_settings, Settings};
use crate::models::{Refinement, SortOrder};
use crate::views::{BrowseView, DocumentView, SearchView, TopicDocumentsView};

#[derive(Debug, Parser)]
#[command(name = "topic-explorer", version, about = "Explore topic-modeled document collections")]
pub struct Cli {
    /// API base URL (overrides config files)
    #[arg(long, global = true, env = "TOPIC_EXPLORER_BASE_URL")]
    pub base_url: Option<String>,

    /// Explicit TOML config file
    #[arg(long, global = true, env = "TOPIC_EXPLORER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Print raw JSON instead of formatted output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all documents
    Docs {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Search documents
    Search {
        /// Search term
        term: String,
        #[command(flatten)]
        refine: RefineArgs,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Show one document with its regions, similar topics and documents
    Doc {
        /// Document id
        id: String,
    },
    /// List documents belonging to a topic
    TopicDocs {
        /// Topic id
        topic_id: String,
        /// Topic label to show in the heading (as carried by topic links)
        #[arg(long)]
        label: Option<String>,
        #[command(flatten)]
        refine: RefineArgs,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// List all topics
    Topics {
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Search topics by label
    Labels {
        query: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Documents similar to a document
    SimilarDocs { id: String },
    /// Topics similar to a document
    SimilarTopics { id: String },
    /// Fields the backend allows sorting and filtering on
    Fields,
}

/// Sort and filter flags shared by listing commands.
#[derive(Debug, Args)]
pub struct RefineArgs {
    /// Metadata field to sort on
    #[arg(long, default_value = "")]
    pub sort: String,
    /// Sort order (asc or desc)
    #[arg(long)]
    pub order: Option<SortOrder>,
    /// Metadata field to filter on
    #[arg(long, default_value = "")]
    pub filter_field: String,
    /// Filter text
    #[arg(long, default_value = "")]
    pub filter_input: String,
}

impl RefineArgs {
    fn to_refinement(&self) -> Refinement {
        Refinement::new()
            .sort(&self.sort, self.order)
            .filter(&self.filter_field, &self.filter_input)
    }
}

impl Cli {
    /// Resolve settings with precedence flags > env > config file > defaults.
    pub async fn settings(&self) -> Result<Settings> {
        let mut settings = load_settings(self.config.as_deref())
            .await
            .context("failed to load configuration")?;
        if let Some(ref base_url) = self.base_url {
            settings.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout {
            settings.request_timeout = timeout;
        }
        Ok(settings)
    }
}

/// Run a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let settings = cli.settings().await?;
    let client = ApiClient::from_settings(&settings)?;
    debug!(base_url = %client.base_url(), "using API");
    let gateway: Arc<dyn Gateway> = Arc::new(client);
    let out = render::Renderer::new(cli.json);

    match cli.command {
        Command::Docs { page } => {
            let mut view = SearchView::mount(gateway);
            view.settled().await;
            view.set_page(page);
            out.search(&view)
        }
        Command::Search { term, refine, page } => {
            let mut view = SearchView::mount(gateway);
            view.set_term(&term);
            view.set_sort(&refine.sort, refine.order);
            view.set_filter(&refine.filter_field, &refine.filter_input);
            out.incomplete_pairs(&view.incomplete_pairs());
            view.submit();
            view.settled().await;
            view.set_page(page);
            out.search(&view)
        }
        Command::Doc { id } => {
            let view = DocumentView::mount(gateway, &id);
            view.settled().await;
            out.document(&view)
        }
        Command::TopicDocs {
            topic_id,
            label,
            refine,
            page,
        } => {
            let refinement = refine.to_refinement();
            out.incomplete_pairs(&refinement.incomplete_pairs());
            let mut view = TopicDocumentsView::mount_with(gateway, &topic_id, refinement);
            if let Some(label) = label {
                view = view.with_label(label);
            }
            view.settled().await;
            view.set_page(page);
            out.topic_documents(&view)
        }
        Command::Topics { page } => {
            let mut view = BrowseView::mount(gateway);
            view.settled().await;
            view.set_page(page);
            out.browse(&view)
        }
        Command::Labels { query, page } => {
            let mut view = BrowseView::mount(gateway);
            view.set_query(&query);
            view.submit();
            view.settled().await;
            view.set_page(page);
            out.browse(&view)
        }
        Command::SimilarDocs { id } => {
            let documents = gateway.similar_documents(&id).await?;
            out.document_list(&documents)
        }
        Command::SimilarTopics { id } => {
            let topics = gateway.similar_topics(&id).await?;
            out.topic_list(&topics)
        }
        Command::Fields => {
            let (sort, filter) = futures::try_join!(
                gateway.allowed_sort_fields(),
                gateway.allowed_filter_fields()
            )?;
            out.fields(&sort, &filter)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_flags() {
        let cli = Cli::try_parse_from([
            "topic-explorer",
            "search",
            "climate",
            "--sort",
            "year",
            "--order",
            "desc",
            "--page",
            "2",
        ])
        .unwrap();

        match cli.command {
            Command::Search { term, refine, page } => {
                assert_eq!(term, "climate");
                assert_eq!(page, 2);
                let refinement = refine.to_refinement();
                assert_eq!(refinement.sort_pair(), Some(("year", SortOrder::Desc)));
                assert_eq!(refinement.filter_pair(), None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_bad_order() {
        let result = Cli::try_parse_from(["topic-explorer", "topic-docs", "7", "--order", "up"]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_flag_overrides_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("explorer.toml");
        std::fs::write(&path, "base_url = \"http://from-file:1\"\nrequest_timeout = 9\n").unwrap();

        let cli = Cli::try_parse_from([
            "topic-explorer",
            "--config",
            path.to_str().unwrap(),
            "--base-url",
            "http://from-flag:2",
            "fields",
        ])
        .unwrap();

        let settings = cli.settings().await.unwrap();
        assert_eq!(settings.base_url, "http://from-flag:2");
        assert_eq!(settings.request_timeout, 9);
    }
}
