pub mod config;
pub mod fetcher;
pub mod ffi;
pub mod filter;
pub mod model;
pub mod pipeline;
pub mod search;
pub mod sort;

#[cfg(test)]
mod test_support;

pub use config::{ConfigError, FieldWeights, SearchConfig};
pub use fetcher::{get_recipe, load_recipes, parse_recipes, FetchError};
pub use filter::{apply_filters, CookTimeBucket, FilterState, Selection, Stage};
pub use model::*;
pub use pipeline::{Pagination, RecipeSearch, ResultPage, SearchOutcome};
pub use search::{SearchIndex, SearchResult};
pub use sort::{sort_recipes, SortBy};

uniffi::setup_scaffolding!();
