//! The search → filter → sort pipeline behind the recipe listing.
//!
//! [`RecipeSearch`] recomputes the whole listing from the collection and the
//! current [`FilterState`] on every call. Two things are cached: the fuzzy
//! index, rebuilt only when the collection version changes, and the last
//! outcome, returned as-is when called again with the same inputs.

use crate::config::SearchConfig;
use crate::filter::{apply_filters, FilterState};
use crate::model::{Recipe, RecipeCollection};
use crate::search::{is_search_query, SearchIndex};
use crate::sort::sort_recipes;
use tracing::debug;

mod model;

pub use model::{Pagination, ResultPage, SearchOutcome};

#[derive(Debug)]
struct Memo {
    version: u64,
    filters: FilterState,
    outcome: SearchOutcome,
}

/// Stateful front end to the pipeline, one per page session.
///
/// # Examples
///
/// ```
/// use brunch_find::{FilterState, RecipeCollection, RecipeSearch};
///
/// let recipes = serde_json::from_str(r#"[
///     { "slug": "lemon-bars", "title": "Lemon Bars", "cookTime": 40 },
///     { "slug": "jam-scones", "title": "Jam Scones", "cookTime": 20 }
/// ]"#)?;
/// let collection = RecipeCollection::new(recipes)?;
///
/// let mut search = RecipeSearch::default();
/// assert!(search.run(None, &FilterState::default()).loading);
///
/// let filters = FilterState {
///     search_query: "lemon".to_string(),
///     ..FilterState::default()
/// };
/// let outcome = search.run(Some(&collection), &filters);
/// assert_eq!(outcome.slugs(), vec!["lemon-bars"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct RecipeSearch {
    config: SearchConfig,
    index: Option<SearchIndex>,
    index_builds: usize,
    memo_hits: usize,
    memo: Option<Memo>,
}

impl Default for RecipeSearch {
    fn default() -> Self {
        RecipeSearch::new(SearchConfig::default())
    }
}

impl RecipeSearch {
    pub fn new(config: SearchConfig) -> Self {
        RecipeSearch {
            config,
            index: None,
            index_builds: 0,
            memo_hits: 0,
            memo: None,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// How many times a search index has been built so far.
    pub fn index_builds(&self) -> usize {
        self.index_builds
    }

    /// How many runs were answered from the last outcome without recomputing.
    pub fn memo_hits(&self) -> usize {
        self.memo_hits
    }

    /// Produces the listing for `filters`.
    ///
    /// `None` means the recipes have not loaded yet, which yields a loading
    /// outcome whatever the filters say. An empty collection is ready with
    /// no results and never touches the index.
    pub fn run(
        &mut self,
        collection: Option<&RecipeCollection>,
        filters: &FilterState,
    ) -> SearchOutcome {
        let Some(collection) = collection else {
            debug!("Recipes not loaded yet");
            return SearchOutcome::loading(self.config.page_size);
        };

        if let Some(memo) = &self.memo {
            if memo.version == collection.version() && memo.filters == *filters {
                debug!("Reusing listing for collection v{}", memo.version);
                self.memo_hits += 1;
                return memo.outcome.clone();
            }
        }

        let outcome = self.compute(collection, filters);
        self.memo = Some(Memo {
            version: collection.version(),
            filters: filters.clone(),
            outcome: outcome.clone(),
        });
        outcome
    }

    fn compute(&mut self, collection: &RecipeCollection, filters: &FilterState) -> SearchOutcome {
        let searching = !collection.is_empty()
            && is_search_query(&filters.search_query, self.config.min_query_len);

        let candidates: Vec<&Recipe> = if searching {
            self.index_for(collection)
                .search_recipes(collection, &filters.search_query)
        } else {
            collection.iter().collect()
        };
        let matched = candidates.len();

        let mut results = apply_filters(candidates, filters);
        sort_recipes(&mut results, filters.sort_by);

        debug!(
            "Listing for collection v{}: {} of {} recipes ({} matched text), sorted {}",
            collection.version(),
            results.len(),
            collection.len(),
            matched,
            filters.sort_by
        );

        SearchOutcome::ready(
            results.into_iter().cloned().collect(),
            self.config.page_size,
        )
    }

    fn index_for(&mut self, collection: &RecipeCollection) -> &SearchIndex {
        if self
            .index
            .as_ref()
            .is_some_and(|index| index.version() != collection.version())
        {
            self.index = None;
        }

        let config = &self.config;
        let builds = &mut self.index_builds;
        self.index.get_or_insert_with(|| {
            *builds += 1;
            SearchIndex::build(collection, config)
        })
    }
}
