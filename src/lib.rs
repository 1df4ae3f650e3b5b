//! Client library for a topic-modeling document explorer.
//!
//! - [`api`]: the query gateway ([`api::Gateway`] trait and the HTTP
//!   [`api::ApiClient`])
//! - [`views`]: headless page views that consume the gateway
//! - [`fetch`]: per-query load state and cancellable query slots
//! - [`pagination`]: client-side page slicing
//! - [`config`]: settings discovery

pub mod api;
pub mod cli;
pub mod config;
pub mod fetch;
pub mod models;
pub mod pagination;
pub mod views;

pub use api::{ApiClient, ApiError, Gateway};
pub use fetch::{LoadState, Outcome};
pub use models::{Document, Refinement, SortOrder, Topic};
