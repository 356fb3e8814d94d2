use super::{Category, Difficulty, Recipe, Season};
use serde::Serialize;
use std::collections::BTreeMap;

/// One selectable facet value and how many recipes carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetCount<T> {
    pub value: T,
    pub count: usize,
}

/// The choices a filter panel offers for a recipe collection.
///
/// Enumerated facets are listed in declaration order, free-form facets
/// (dietary tags and tags) alphabetically. Values no recipe carries are
/// omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetOptions {
    pub categories: Vec<FacetCount<Category>>,
    pub seasons: Vec<FacetCount<Season>>,
    pub difficulties: Vec<FacetCount<Difficulty>>,
    pub dietary: Vec<FacetCount<String>>,
    pub tags: Vec<FacetCount<String>>,
}

impl FacetOptions {
    pub fn from_recipes<'a>(recipes: impl IntoIterator<Item = &'a Recipe>) -> Self {
        let mut categories = BTreeMap::new();
        let mut seasons = BTreeMap::new();
        let mut difficulties = BTreeMap::new();
        let mut dietary = BTreeMap::new();
        let mut tags = BTreeMap::new();

        for recipe in recipes {
            if let Some(category) = recipe.category {
                *categories.entry(category).or_insert(0) += 1;
            }
            if let Some(season) = recipe.season {
                *seasons.entry(season).or_insert(0) += 1;
            }
            if let Some(difficulty) = recipe.difficulty {
                *difficulties.entry(difficulty).or_insert(0) += 1;
            }
            count_distinct(&mut dietary, &recipe.dietary);
            count_distinct(&mut tags, &recipe.tags);
        }

        FacetOptions {
            categories: into_counts(categories),
            seasons: into_counts(seasons),
            difficulties: into_counts(difficulties),
            dietary: into_counts(dietary),
            tags: into_counts(tags),
        }
    }
}

// A recipe listing the same tag twice still counts once.
fn count_distinct(counts: &mut BTreeMap<String, usize>, values: &[String]) {
    for (i, value) in values.iter().enumerate() {
        if !values[..i].contains(value) {
            *counts.entry(value.clone()).or_insert(0) += 1;
        }
    }
}

fn into_counts<T>(counts: BTreeMap<T, usize>) -> Vec<FacetCount<T>> {
    counts
        .into_iter()
        .map(|(value, count)| FacetCount { value, count })
        .collect()
}
