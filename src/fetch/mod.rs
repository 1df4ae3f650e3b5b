//! Load state for view queries.
//!
//! Every query a view issues lives in a [`QuerySlot`] and is observed as a
//! [`LoadState`]: still loading, loaded, or failed. A loaded list can be
//! further classified with [`LoadState::outcome`] so that an empty result is
//! never confused with a failed request.

mod slot;

pub use slot::QuerySlot;

use std::sync::Arc;

use crate::api::ApiError;

/// State of one query.
#[derive(Debug, Clone)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Failed(Arc<ApiError>),
}

impl<T> LoadState<T> {
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => LoadState::Loaded(value),
            Err(err) => LoadState::Failed(Arc::new(err)),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// Loaded or failed.
    pub fn is_settled(&self) -> bool {
        !self.is_loading()
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            LoadState::Failed(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl<T> LoadState<Vec<T>> {
    /// Classify a list query.
    pub fn outcome(&self) -> Outcome {
        match self {
            LoadState::Loading => Outcome::Pending,
            LoadState::Loaded(items) if items.is_empty() => Outcome::Empty,
            LoadState::Loaded(items) => Outcome::Data(items.len()),
            LoadState::Failed(_) => Outcome::Failure,
        }
    }

    /// Loaded items, or an empty slice while loading or after a failure.
    pub fn items(&self) -> &[T] {
        self.loaded().map(Vec::as_slice).unwrap_or(&[])
    }
}

/// What a list query produced, as far as rendering is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pending,
    /// Success with this many items.
    Data(usize),
    /// Success with zero items.
    Empty,
    Failure,
}
