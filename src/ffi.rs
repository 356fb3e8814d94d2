//! UniFFI bindings for cross-platform support (iOS, Android).
//!
//! Filter values cross the boundary as the same strings the web UI uses
//! ("all", "Fall", "under-30", "quick-first", ...) and are parsed into the
//! typed filter model here, so an unknown value is reported instead of
//! quietly matching nothing.

use crate::config::{ConfigError, SearchConfig};
use crate::fetcher::{get_recipe, load_recipes, parse_recipes, FetchError};
use crate::filter::FilterState;
use crate::model::{FacetCount, FacetOptions, ParseValueError, Recipe, RecipeCollection};
use crate::pipeline::{RecipeSearch, SearchOutcome};
use camino::Utf8Path;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum BrunchError {
    #[error("Recipe not found: {message}")]
    NotFound { message: String },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },

    #[error("Invalid filter: {message}")]
    InvalidFilter { message: String },

    #[error("Config error: {message}")]
    ConfigError { message: String },
}

impl From<FetchError> for BrunchError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::IoError(e) => BrunchError::IoError {
                message: e.to_string(),
            },
            FetchError::NotFound(slug) => BrunchError::NotFound { message: slug },
            FetchError::InvalidPath(p) => BrunchError::InvalidPath {
                message: p.to_string(),
            },
            other => BrunchError::ParseError {
                message: other.to_string(),
            },
        }
    }
}

impl From<ParseValueError> for BrunchError {
    fn from(e: ParseValueError) -> Self {
        BrunchError::InvalidFilter {
            message: e.to_string(),
        }
    }
}

impl From<ConfigError> for BrunchError {
    fn from(e: ConfigError) -> Self {
        BrunchError::ConfigError {
            message: e.to_string(),
        }
    }
}

// Counts past u32::MAX are reported as u32::MAX.
fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiIngredient {
    pub name: String,
    pub amount: Option<String>,
    pub unit: Option<String>,
}

/// FFI-safe representation of a recipe.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecipe {
    pub slug: String,
    pub title: String,
    pub category: Option<String>,
    pub dietary: Vec<String>,
    pub season: Option<String>,
    pub difficulty: Option<String>,
    /// Cook time in minutes, if known
    pub cook_time: Option<u32>,
    pub tags: Vec<String>,
    pub ingredients: Vec<FfiIngredient>,
    pub story: Vec<String>,
    pub date: Option<String>,
}

impl From<&Recipe> for FfiRecipe {
    fn from(r: &Recipe) -> Self {
        FfiRecipe {
            slug: r.slug.clone(),
            title: r.title.clone(),
            category: r.category.map(|c| c.to_string()),
            dietary: r.dietary.clone(),
            season: r.season.map(|s| s.to_string()),
            difficulty: r.difficulty.map(|d| d.to_string()),
            cook_time: r.cook_time,
            tags: r.tags.clone(),
            ingredients: r
                .ingredients
                .iter()
                .map(|i| FfiIngredient {
                    name: i.name.clone(),
                    amount: i.amount.clone(),
                    unit: i.unit.clone(),
                })
                .collect(),
            story: r.story.clone(),
            date: r.date.clone(),
        }
    }
}

/// Filter panel state with every single-choice facet as its UI string.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFilterState {
    pub search_query: String,
    pub category: String,
    pub dietary: Vec<String>,
    pub season: String,
    pub difficulty: String,
    pub cook_time: String,
    pub tags: Vec<String>,
    pub sort_by: String,
}

impl TryFrom<FfiFilterState> for FilterState {
    type Error = ParseValueError;

    fn try_from(f: FfiFilterState) -> Result<Self, Self::Error> {
        Ok(FilterState {
            search_query: f.search_query,
            category: f.category.parse()?,
            dietary: f.dietary.into_iter().collect::<BTreeSet<_>>(),
            season: f.season.parse()?,
            difficulty: f.difficulty.parse()?,
            cook_time: f.cook_time.parse()?,
            tags: f.tags.into_iter().collect::<BTreeSet<_>>(),
            sort_by: f.sort_by.parse()?,
        })
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSearchOutcome {
    pub results: Vec<FfiRecipe>,
    pub count: u32,
    pub loading: bool,
}

impl From<&SearchOutcome> for FfiSearchOutcome {
    fn from(o: &SearchOutcome) -> Self {
        FfiSearchOutcome {
            results: o.results.iter().map(FfiRecipe::from).collect(),
            count: saturating_u32(o.count),
            loading: o.loading,
        }
    }
}

/// A facet value as its UI string, with the number of recipes carrying it.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFacetCount {
    pub value: String,
    pub count: u32,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFacetOptions {
    pub categories: Vec<FfiFacetCount>,
    pub seasons: Vec<FfiFacetCount>,
    pub difficulties: Vec<FfiFacetCount>,
    pub dietary: Vec<FfiFacetCount>,
    pub tags: Vec<FfiFacetCount>,
}

fn facet_counts<T: ToString>(counts: &[FacetCount<T>]) -> Vec<FfiFacetCount> {
    counts
        .iter()
        .map(|c| FfiFacetCount {
            value: c.value.to_string(),
            count: saturating_u32(c.count),
        })
        .collect()
}

impl From<&FacetOptions> for FfiFacetOptions {
    fn from(f: &FacetOptions) -> Self {
        FfiFacetOptions {
            categories: facet_counts(&f.categories),
            seasons: facet_counts(&f.seasons),
            difficulties: facet_counts(&f.difficulties),
            dietary: facet_counts(&f.dietary),
            tags: facet_counts(&f.tags),
        }
    }
}

/// A loaded recipe collection together with its search state.
#[derive(uniffi::Object)]
pub struct FfiRecipeSearch {
    collection: RecipeCollection,
    search: Mutex<RecipeSearch>,
}

impl FfiRecipeSearch {
    fn new(collection: RecipeCollection, config: SearchConfig) -> Self {
        FfiRecipeSearch {
            collection,
            search: Mutex::new(RecipeSearch::new(config)),
        }
    }
}

#[uniffi::export]
impl FfiRecipeSearch {
    /// Loads recipes from a `.json`/`.yaml` file or a directory of recipe files.
    #[uniffi::constructor]
    pub fn from_path(path: String) -> Result<Arc<Self>, BrunchError> {
        let collection = load_recipes(Utf8Path::new(&path))?;
        Ok(Arc::new(Self::new(collection, SearchConfig::default())))
    }

    /// Builds a search over a `GET /api/recipes` response body.
    #[uniffi::constructor]
    pub fn from_json(json: String) -> Result<Arc<Self>, BrunchError> {
        let collection = parse_recipes(&json)?;
        Ok(Arc::new(Self::new(collection, SearchConfig::default())))
    }

    /// Like `from_json`, with search tuning read from a YAML document.
    #[uniffi::constructor]
    pub fn from_json_with_config(json: String, config_yaml: String) -> Result<Arc<Self>, BrunchError> {
        let config = SearchConfig::from_yaml_str(&config_yaml)?;
        let collection = parse_recipes(&json)?;
        Ok(Arc::new(Self::new(collection, config)))
    }

    /// Runs the search, filter and sort pipeline.
    pub fn search(&self, filters: FfiFilterState) -> Result<FfiSearchOutcome, BrunchError> {
        let filters = FilterState::try_from(filters)?;
        let mut search = self
            .search
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let outcome = search.run(Some(&self.collection), &filters);
        Ok(FfiSearchOutcome::from(&outcome))
    }

    /// Returns the recipe with the given slug.
    pub fn recipe(&self, slug: String) -> Result<FfiRecipe, BrunchError> {
        let recipe = get_recipe(&self.collection, &slug)?;
        Ok(FfiRecipe::from(recipe))
    }

    /// Returns the filter choices available for the loaded recipes.
    pub fn facets(&self) -> FfiFacetOptions {
        FfiFacetOptions::from(&FacetOptions::from_recipes(&self.collection))
    }

    pub fn recipe_count(&self) -> u32 {
        saturating_u32(self.collection.len())
    }
}

/// Returns a filter state with nothing selected and the default sort.
#[uniffi::export]
pub fn default_filter_state() -> FfiFilterState {
    let defaults = FilterState::default();
    FfiFilterState {
        search_query: defaults.search_query,
        category: defaults.category.to_string(),
        dietary: Vec::new(),
        season: defaults.season.to_string(),
        difficulty: defaults.difficulty.to_string(),
        cook_time: defaults.cook_time.to_string(),
        tags: Vec::new(),
        sort_by: defaults.sort_by.to_string(),
    }
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::fs;
    use tempfile::TempDir;

    const PAYLOAD: &str = indoc! {r#"
        [
          { "slug": "lemon-bars", "title": "Lemon Bars", "category": "Bars",
            "season": "Summer", "cookTime": 40, "tags": ["citrus"], "date": "2024-05-04" },
          { "slug": "jam-scones", "title": "Jam Scones", "category": "Scones",
            "season": "All Seasons", "cookTime": 20, "dietary": ["Vegetarian"], "date": "2024-01-10" },
          { "slug": "pumpkin-pie", "title": "Pumpkin Pie", "category": "Pies",
            "season": "Fall", "cookTime": 70, "tags": ["holiday"], "date": "2023-11-20" }
        ]"#};

    #[test]
    fn test_default_filter_state_strings() {
        let state = default_filter_state();
        assert_eq!(state.category, "all");
        assert_eq!(state.cook_time, "all");
        assert_eq!(state.sort_by, "newest");
        assert!(FilterState::try_from(state).unwrap().is_default());
    }

    #[test]
    fn test_search_through_ffi() {
        let search = FfiRecipeSearch::from_json(PAYLOAD.to_string()).unwrap();
        let mut filters = default_filter_state();
        filters.season = "Summer".to_string();
        filters.sort_by = "a-z".to_string();

        let outcome = search.search(filters).unwrap();
        assert!(!outcome.loading);
        assert_eq!(outcome.count, 2);
        let slugs: Vec<_> = outcome.results.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["jam-scones", "lemon-bars"]);
        assert_eq!(outcome.results[0].season.as_deref(), Some("All Seasons"));
    }

    #[test]
    fn test_invalid_filter_value() {
        let search = FfiRecipeSearch::from_json(PAYLOAD.to_string()).unwrap();
        let mut filters = default_filter_state();
        filters.season = "Al".to_string();

        let result = search.search(filters);
        assert!(matches!(result, Err(BrunchError::InvalidFilter { .. })));
    }

    #[test]
    fn test_recipe_lookup() {
        let search = FfiRecipeSearch::from_json(PAYLOAD.to_string()).unwrap();

        let pie = search.recipe("pumpkin-pie".to_string()).unwrap();
        assert_eq!(pie.category.as_deref(), Some("Pies"));
        assert_eq!(pie.cook_time, Some(70));

        let missing = search.recipe("banana-bread".to_string());
        assert!(matches!(missing, Err(BrunchError::NotFound { .. })));
    }

    #[test]
    fn test_facets() {
        let search = FfiRecipeSearch::from_json(PAYLOAD.to_string()).unwrap();
        let facets = search.facets();

        let categories: Vec<_> = facets.categories.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(categories, vec!["Bars", "Pies", "Scones"]);
        assert_eq!(facets.dietary[0].value, "Vegetarian");
        assert_eq!(search.recipe_count(), 3);
    }

    #[test]
    fn test_from_path_and_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("recipes.json");
        fs::write(&path, PAYLOAD).unwrap();

        let search = FfiRecipeSearch::from_path(path.to_str().unwrap().to_string()).unwrap();
        assert_eq!(search.recipe_count(), 3);

        let bad = FfiRecipeSearch::from_json_with_config(PAYLOAD.to_string(), "threshold: 2".to_string());
        assert!(matches!(bad, Err(BrunchError::ConfigError { .. })));

        let missing = FfiRecipeSearch::from_path("/nonexistent/recipes.json".to_string());
        assert!(matches!(missing, Err(BrunchError::InvalidPath { .. })));
    }

    #[test]
    fn test_counts_saturate() {
        assert_eq!(saturating_u32(3), 3);
        assert_eq!(saturating_u32(u32::MAX as usize), u32::MAX);
        if let Some(too_many) = (u32::MAX as usize).checked_add(1) {
            assert_eq!(saturating_u32(too_many), u32::MAX);
        }
    }

    #[test]
    fn test_library_version() {
        let version = library_version();
        assert!(!version.is_empty());
        assert_eq!(version, env!("CARGO_PKG_VERSION"));
    }
}
