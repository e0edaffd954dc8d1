//! # Search
//!
//! Title search over the live recipe collection.
//!
//! ## Scoring
//!
//! A recipe's score for a term is the number of non-overlapping,
//! case-insensitive occurrences of the term in its title. Recipes scoring zero
//! are dropped. The rest are ordered by score in the configured [`SortOrder`];
//! ties keep collection order.
//!
//! The default order is **ascending**, so the weakest matches come first. That
//! is the long-standing behavior clients depend on. Pass
//! [`SortOrder::Descending`] to rank the strongest matches first.
//!
//! ## Stateless Relevance Scan
//!
//! [`ScanSearch`] keeps no index. Every query copies the current collection out
//! of the store and scores it from scratch, so results can never be stale.
//! The `index_*` hooks on [`SearchIndex`] are no-ops here. They exist so a
//! maintained index (e.g. term → slugs) can replace the scan without changing
//! callers, which already invoke the hooks after each successful mutation.

use crate::error::{RecipeError, Result};
use crate::model::Recipe;
use crate::storage::backend::StorageBackend;
use crate::store::RecipeStore;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

const EXCERPT_CHARS: usize = 160;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Error)]
#[error("unknown sort order '{0}' (expected 'ascending' or 'descending')")]
pub struct UnknownSortOrder(String);

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(UnknownSortOrder(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub recipe: Recipe,
    pub score: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

pub trait SearchIndex {
    /// Rank recipes against `term`.
    fn search(&self, term: &str) -> Result<Vec<SearchResult>>;

    /// Called after a recipe was added to the store.
    fn index_add(&self, recipe: &Recipe) -> Result<()>;

    /// Called after a recipe was replaced in the store.
    fn index_update(&self, recipe: &Recipe) -> Result<()>;

    /// Called after a recipe was removed from the store.
    fn index_remove(&self, recipe: &Recipe) -> Result<()>;
}

pub struct ScanSearch<B: StorageBackend> {
    store: Arc<RecipeStore<B>>,
    order: SortOrder,
}

impl<B: StorageBackend> ScanSearch<B> {
    pub fn new(store: Arc<RecipeStore<B>>) -> Self {
        Self {
            store,
            order: SortOrder::default(),
        }
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }
}

impl<B: StorageBackend> SearchIndex for ScanSearch<B> {
    fn search(&self, term: &str) -> Result<Vec<SearchResult>> {
        if term.is_empty() {
            return Err(RecipeError::InvalidArgument(
                "Search term must not be empty".to_string(),
            ));
        }

        let needle = term.to_lowercase();
        let mut results: Vec<SearchResult> = self
            .store
            .list_all()?
            .into_iter()
            .filter_map(|recipe| {
                let score = title_score(&recipe.title, &needle);
                if score == 0 {
                    return None;
                }
                let excerpt = excerpt(&recipe.description);
                Some(SearchResult {
                    recipe,
                    score,
                    excerpt,
                })
            })
            .collect();

        // sort_by_key is stable: equal scores keep collection order
        match self.order {
            SortOrder::Ascending => results.sort_by_key(|r| r.score),
            SortOrder::Descending => results.sort_by_key(|r| std::cmp::Reverse(r.score)),
        }

        debug!(term, hits = results.len(), "search");
        Ok(results)
    }

    fn index_add(&self, _recipe: &Recipe) -> Result<()> {
        Ok(())
    }

    fn index_update(&self, _recipe: &Recipe) -> Result<()> {
        Ok(())
    }

    fn index_remove(&self, _recipe: &Recipe) -> Result<()> {
        Ok(())
    }
}

/// Occurrences of an already-lowercased needle in `title`.
fn title_score(title: &str, needle: &str) -> usize {
    title.to_lowercase().matches(needle).count()
}

fn excerpt(description: &str) -> Option<String> {
    let text = description.trim();
    if text.is_empty() {
        return None;
    }
    match text.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => Some(format!("{}…", text[..cut].trim_end())),
        None => Some(text.to_string()),
    }
}
