use super::Recipe;
use regex::Regex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use thiserror::Error;

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

/// Errors raised when a set of recipes violates the slug invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    #[error("Recipe {title:?} has an empty slug")]
    EmptySlug { title: String },

    #[error("Invalid recipe slug: {0:?}")]
    InvalidSlug(String),

    #[error("Duplicate recipe slug: {0:?}")]
    DuplicateSlug(String),
}

/// An immutable, cheaply clonable set of recipes.
///
/// Every collection built with [`RecipeCollection::new`] gets a fresh
/// `version`. Clones share the version of the collection they were cloned
/// from, so the version identifies the content, not the handle. Caches
/// (such as the search index) are keyed on it.
#[derive(Debug, Clone)]
pub struct RecipeCollection {
    version: u64,
    recipes: Arc<[Recipe]>,
    by_slug: Arc<HashMap<String, usize>>,
}

impl RecipeCollection {
    /// Builds a collection, checking that every slug is well-formed and unique.
    ///
    /// # Errors
    ///
    /// Returns `CollectionError` for the first recipe whose slug is empty,
    /// malformed or already taken.
    pub fn new(recipes: Vec<Recipe>) -> Result<Self, CollectionError> {
        let mut by_slug = HashMap::with_capacity(recipes.len());

        for (position, recipe) in recipes.iter().enumerate() {
            if recipe.slug.is_empty() {
                return Err(CollectionError::EmptySlug {
                    title: recipe.title.clone(),
                });
            }
            if !slug_pattern().is_match(&recipe.slug) {
                return Err(CollectionError::InvalidSlug(recipe.slug.clone()));
            }
            if by_slug.insert(recipe.slug.clone(), position).is_some() {
                return Err(CollectionError::DuplicateSlug(recipe.slug.clone()));
            }
        }

        Ok(RecipeCollection {
            version: NEXT_VERSION.fetch_add(1, Ordering::Relaxed),
            recipes: recipes.into(),
            by_slug: Arc::new(by_slug),
        })
    }

    pub fn empty() -> Self {
        RecipeCollection {
            version: NEXT_VERSION.fetch_add(1, Ordering::Relaxed),
            recipes: Arc::from(Vec::<Recipe>::new()),
            by_slug: Arc::default(),
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recipe> {
        self.recipes.iter()
    }

    /// Looks a recipe up by slug.
    pub fn get(&self, slug: &str) -> Option<&Recipe> {
        self.by_slug.get(slug).map(|&position| &self.recipes[position])
    }
}

impl<'a> IntoIterator for &'a RecipeCollection {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn slug_pattern() -> &'static Regex {
    static SLUG: OnceLock<Regex> = OnceLock::new();
    SLUG.get_or_init(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug pattern is valid"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture_recipes, recipe};

    #[test]
    fn test_collection_lookup_by_slug() {
        let collection = RecipeCollection::new(fixture_recipes()).unwrap();

        assert_eq!(collection.len(), 4);
        assert_eq!(
            collection.get("apple-pie").map(|r| r.title.as_str()),
            Some("Classic Apple Pie")
        );
        assert!(collection.get("banana-bread").is_none());
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let err = RecipeCollection::new(vec![
            recipe("lemon-bars", "Lemon Bars"),
            recipe("lemon-bars", "Lemon Bars Again"),
        ])
        .unwrap_err();

        assert_eq!(err, CollectionError::DuplicateSlug("lemon-bars".to_string()));
    }

    #[test]
    fn test_malformed_slugs_rejected() {
        for slug in ["Lemon Bars", "lemon--bars", "-lemon", "lemon/bars"] {
            let result = RecipeCollection::new(vec![recipe(slug, "Lemon Bars")]);
            assert_eq!(
                result.unwrap_err(),
                CollectionError::InvalidSlug(slug.to_string()),
                "slug {:?} should be rejected",
                slug
            );
        }

        let result = RecipeCollection::new(vec![recipe("", "Nameless")]);
        assert!(matches!(result, Err(CollectionError::EmptySlug { .. })));
    }

    #[test]
    fn test_versions_identify_content_not_handle() {
        let first = RecipeCollection::new(fixture_recipes()).unwrap();
        let second = RecipeCollection::new(fixture_recipes()).unwrap();
        let handle = first.clone();

        assert_ne!(first.version(), second.version());
        assert_eq!(first.version(), handle.version());
        assert!(second.version() > first.version());
    }

    #[test]
    fn test_empty_collection() {
        let collection = RecipeCollection::empty();
        assert!(collection.is_empty());
        assert_eq!(collection.iter().count(), 0);
    }
}
