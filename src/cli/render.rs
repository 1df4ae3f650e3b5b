//! Terminal output for views.

use anyhow::{bail, Result};
use console::style;
use serde::Serialize;

use crate::fetch::{LoadState, Outcome};
use crate::models::{Document, IncompletePair, Topic};
use crate::pagination::Pager;
use crate::views::{BrowseView, DocumentView, Route, SearchView, TopicDocumentsView};

/// Fields shown under each document in listings, when present.
const LIST_FIELDS: &[&str] = &["author", "year"];

pub struct Renderer {
    json: bool,
}

impl Renderer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn incomplete_pairs(&self, pairs: &[IncompletePair]) {
        for pair in pairs {
            let hint = match pair {
                IncompletePair::Sort => "--sort and --order must both be given; sorting ignored",
                IncompletePair::Filter => {
                    "--filter-field and --filter-input must both be given; filter ignored"
                }
            };
            eprintln!("{} {}", style("note:").yellow(), hint);
        }
    }

    pub fn search(&self, view: &SearchView) -> Result<()> {
        let state = view.documents();
        ensure_loaded(&state, "documents")?;
        if self.json {
            return print_json(&view.current_page());
        }
        self.paged_documents(&state, &view.current_page(), view.pager())
    }

    pub fn topic_documents(&self, view: &TopicDocumentsView) -> Result<()> {
        let state = view.documents();
        ensure_loaded(&state, "topic documents")?;
        if self.json {
            return print_json(&view.current_page());
        }
        match view.label() {
            Some(label) => println!(
                "{} {}  {}",
                style("Topic:").bold(),
                label,
                style(view.topic_id()).dim()
            ),
            None => println!("{} {}", style("Topic").bold(), view.topic_id()),
        }
        self.paged_documents(&state, &view.current_page(), view.pager())
    }

    pub fn browse(&self, view: &BrowseView) -> Result<()> {
        let state = view.topics();
        ensure_loaded(&state, "topics")?;
        if self.json {
            return print_json(&view.current_page());
        }
        if state.outcome() == Outcome::Empty {
            println!("{}", style("No topics found.").dim());
            return Ok(());
        }
        for (label, route) in view.current_links() {
            println!("{}  {}", label, style(route.path()).dim());
        }
        print_position(view.pager(), state.items().len());
        Ok(())
    }

    pub fn document(&self, view: &DocumentView) -> Result<()> {
        let state = view.document();
        ensure_loaded(&state, "document")?;
        let Some(document) = state.loaded() else {
            bail!("document {} did not load", view.document_id());
        };

        if self.json {
            return print_json(document);
        }

        println!("{}", style(document.display_title()).bold());
        for line in view.header_lines() {
            println!("{}", line);
        }
        for (region, err) in view.failed_regions() {
            println!("{} {} {}", style(region).dim(), style("unavailable:").red(), err);
        }
        for section in view.sections() {
            println!();
            println!("{}", style(&section.heading).bold().underlined());
            println!("{}", section.body.as_deref().unwrap_or("-"));
        }

        println!();
        println!("{}", style("SIMILAR TOPICS").bold());
        match view.similar_topics().error() {
            Some(err) => println!("{} {}", style("unavailable:").red(), err),
            None => {
                for (label, route) in view.similar_topic_links() {
                    println!("  {}  {}", label, style(route.path()).dim());
                }
            }
        }

        println!();
        println!("{}", style("SIMILAR DOCUMENTS").bold());
        match view.similar_documents().error() {
            Some(err) => println!("{} {}", style("unavailable:").red(), err),
            None => {
                for (i, group) in view.similar_document_groups().iter().enumerate() {
                    if i > 0 {
                        println!("  {}", style("--").dim());
                    }
                    for doc in group {
                        let route = Route::Document { id: doc.id.clone() };
                        println!("  {}  {}", doc.display_title(), style(route.path()).dim());
                    }
                }
            }
        }
        Ok(())
    }

    pub fn document_list(&self, documents: &[Document]) -> Result<()> {
        if self.json {
            return print_json(&documents);
        }
        if documents.is_empty() {
            println!("{}", style("No documents found.").dim());
        }
        for doc in documents {
            print_document(doc);
        }
        Ok(())
    }

    pub fn topic_list(&self, topics: &[Topic]) -> Result<()> {
        if self.json {
            return print_json(&topics);
        }
        if topics.is_empty() {
            println!("{}", style("No topics found.").dim());
        }
        for topic in topics {
            println!("{}  {}", style(&topic.id).cyan(), topic.label());
        }
        Ok(())
    }

    pub fn fields(&self, sort: &[String], filter: &[String]) -> Result<()> {
        if self.json {
            return print_json(&serde_json::json!({ "sort": sort, "filter": filter }));
        }
        println!("{} {}", style("sort:").bold(), sort.join(", "));
        println!("{} {}", style("filter:").bold(), filter.join(", "));
        Ok(())
    }

    fn paged_documents(
        &self,
        state: &LoadState<Vec<Document>>,
        page: &[Document],
        pager: &Pager,
    ) -> Result<()> {
        if state.outcome() == Outcome::Empty {
            println!("{}", style("No documents found.").dim());
            return Ok(());
        }
        for doc in page {
            print_document(doc);
        }
        print_position(pager, state.items().len());
        Ok(())
    }
}

/// Turn a failed query into a command error so failures exit non-zero,
/// while an empty result still prints normally.
fn ensure_loaded<T>(state: &LoadState<T>, what: &str) -> Result<()> {
    if let Some(err) = state.error() {
        bail!("failed to load {}: {}", what, err);
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_document(doc: &Document) {
    println!("{}  {}", style(&doc.id).cyan(), doc.display_title());
    let details: Vec<String> = LIST_FIELDS
        .iter()
        .filter_map(|field| doc.field(field))
        .collect();
    if !details.is_empty() {
        println!("    {}", style(details.join(" | ")).dim());
    }
}

fn print_position(pager: &Pager, total: usize) {
    match pager.position(total) {
        Some((start, end)) => println!(
            "{}",
            style(format!(
                "{}-{} of {} (page {} of {})",
                start,
                end,
                total,
                pager.page(),
                pager.page_count(total)
            ))
            .dim()
        ),
        None => println!(
            "{}",
            style(format!(
                "page {} is past the end ({} pages)",
                pager.page(),
                pager.page_count(total)
            ))
            .dim()
        ),
    }
}
