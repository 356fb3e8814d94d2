//! Data contracts shared by the search pipeline.
//!
//! [`Recipe`] mirrors the JSON served by the recipe API. The closed
//! vocabularies (category, season, difficulty) are enums so that a typo in
//! data or in a filter is rejected instead of silently matching nothing.

mod collection;
mod facets;
mod recipe;

pub use collection::{CollectionError, RecipeCollection};
pub use facets::{FacetCount, FacetOptions};
pub use recipe::{Category, Difficulty, Ingredient, ParseValueError, Recipe, Season};
