use crate::config::{FieldWeights, SearchConfig};
use crate::model::{Recipe, RecipeCollection};
use std::cmp::Ordering;
use tracing::debug;

mod fuzzy;
mod model;

pub use model::SearchResult;

/// A searchable recipe field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Story,
    Ingredients,
    Tags,
    Category,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Title,
        Field::Story,
        Field::Ingredients,
        Field::Tags,
        Field::Category,
    ];

    pub fn weight(&self, weights: &FieldWeights) -> f64 {
        match self {
            Field::Title => weights.title,
            Field::Story => weights.story,
            Field::Ingredients => weights.ingredients,
            Field::Tags => weights.tags,
            Field::Category => weights.category,
        }
    }

    fn values<'a>(&self, recipe: &'a Recipe) -> Vec<&'a str> {
        match self {
            Field::Title => vec![recipe.title.as_str()],
            Field::Story => recipe.story.iter().map(String::as_str).collect(),
            Field::Ingredients => recipe.ingredients.iter().map(|i| i.name.as_str()).collect(),
            Field::Tags => recipe.tags.iter().map(String::as_str).collect(),
            Field::Category => recipe.category.iter().map(|c| c.as_str()).collect(),
        }
    }
}

/// Returns true when `query` is long enough to filter by text.
pub fn is_search_query(query: &str, min_query_len: usize) -> bool {
    query.trim().chars().count() >= min_query_len
}

/// Pre-normalized field values for one recipe, in `Field::ALL` order.
#[derive(Debug)]
struct IndexedRecipe {
    fields: [Vec<Vec<char>>; 5],
}

/// Typo-tolerant text index over one recipe collection.
///
/// The index remembers the version of the collection it was built from;
/// results refer to recipes by their position in that collection.
#[derive(Debug)]
pub struct SearchIndex {
    version: u64,
    documents: Vec<IndexedRecipe>,
    /// Field weights normalized to sum to 1, in `Field::ALL` order.
    weights: [f64; 5],
    threshold: f64,
    min_query_len: usize,
}

impl SearchIndex {
    pub fn build(collection: &RecipeCollection, config: &SearchConfig) -> Self {
        let documents = collection
            .iter()
            .map(|recipe| IndexedRecipe {
                fields: Field::ALL.map(|field| {
                    field
                        .values(recipe)
                        .into_iter()
                        .map(fuzzy::normalize)
                        .filter(|value| !value.is_empty())
                        .collect()
                }),
            })
            .collect();

        let total = config.weights.total();
        let weights = Field::ALL.map(|field| {
            if total > 0.0 {
                field.weight(&config.weights) / total
            } else {
                0.0
            }
        });

        debug!(
            "Built search index for collection v{} ({} recipes)",
            collection.version(),
            collection.len()
        );

        SearchIndex {
            version: collection.version(),
            documents,
            weights,
            threshold: config.threshold,
            min_query_len: config.min_query_len,
        }
    }

    /// Version of the collection this index was built from.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Ranks the indexed recipes against `query`, best match first.
    ///
    /// Each field is scored by the normalized edit distance of the query to
    /// its closest value; fields scoring within the threshold contribute
    /// `weight * (1 - score)` to the relevance. Recipes without any matching
    /// field are left out. Equal relevance keeps collection order.
    ///
    /// A query shorter than the minimum length is not a search: every recipe
    /// is returned, in collection order, with zero relevance.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        if !is_search_query(query, self.min_query_len) {
            return (0..self.documents.len()).map(SearchResult::new).collect();
        }

        let pattern = fuzzy::normalize(query);
        let mut results: Vec<SearchResult> = self
            .documents
            .iter()
            .enumerate()
            .filter_map(|(position, document)| self.score_document(position, document, &pattern))
            .collect();

        sort_results(&mut results);
        debug!("Query {:?} matched {} recipes", query, results.len());
        results
    }

    /// Runs [`SearchIndex::search`] and resolves the hits in `collection`.
    ///
    /// `collection` should be the one the index was built from; positions
    /// that do not exist in it are skipped.
    pub fn search_recipes<'a>(
        &self,
        collection: &'a RecipeCollection,
        query: &str,
    ) -> Vec<&'a Recipe> {
        self.search(query)
            .into_iter()
            .filter_map(|result| collection.recipes().get(result.position))
            .collect()
    }

    fn score_document(
        &self,
        position: usize,
        document: &IndexedRecipe,
        pattern: &[char],
    ) -> Option<SearchResult> {
        let mut result = SearchResult::new(position);
        let mut matched = false;

        for (values, weight) in document.fields.iter().zip(self.weights) {
            if weight <= 0.0 {
                continue;
            }
            let best = values
                .iter()
                .map(|value| fuzzy::match_score(pattern, value))
                .fold(f64::INFINITY, f64::min);
            if best <= self.threshold {
                matched = true;
                result.add_score(weight * (1.0 - best));
            }
        }

        matched.then_some(result)
    }
}

/// Sort search results by relevance in descending order
fn sort_results(results: &mut [SearchResult]) {
    results.sort_by(|a, b| {
        b.relevance
            .partial_cmp(&a.relevance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.position.cmp(&b.position))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture_recipes;

    fn fixture_index() -> (RecipeCollection, SearchIndex) {
        let collection = RecipeCollection::new(fixture_recipes()).unwrap();
        let index = SearchIndex::build(&collection, &SearchConfig::default());
        (collection, index)
    }

    fn slugs(recipes: &[&Recipe]) -> Vec<String> {
        recipes.iter().map(|r| r.slug.clone()).collect()
    }

    #[test]
    fn test_search_exact_title() {
        let (collection, index) = fixture_index();
        let results = index.search_recipes(&collection, "apple pie");

        assert_eq!(slugs(&results), vec!["apple-pie"]);
    }

    #[test]
    fn test_search_tolerates_typo() {
        let (collection, index) = fixture_index();
        let results = index.search_recipes(&collection, "choclate");

        assert!(!results.is_empty());
        assert!(results[0].title.contains("Chocolate"));
        assert_eq!(results[0].slug, "chocolate-chip-cookies");
    }

    #[test]
    fn test_title_matches_outrank_story_matches() {
        let (collection, index) = fixture_index();
        let results = index.search_recipes(&collection, "chocolate");

        assert_eq!(
            slugs(&results),
            vec!["chocolate-chip-cookies", "fudgy-vegan-brownies"]
        );
        let scores = index.search("chocolate");
        assert!(scores[0].relevance > scores[1].relevance);
    }

    #[test]
    fn test_search_ingredient_and_tag_fields() {
        let (collection, index) = fixture_index();

        let by_ingredient = index.search_recipes(&collection, "cinnamon");
        assert_eq!(slugs(&by_ingredient), vec!["apple-pie"]);

        let by_tag = index.search_recipes(&collection, "fermented");
        assert_eq!(slugs(&by_tag), vec!["sourdough-bread"]);

        let by_category = index.search_recipes(&collection, "brownies");
        assert_eq!(by_category[0].slug, "fudgy-vegan-brownies");
    }

    #[test]
    fn test_search_no_matches() {
        let (_, index) = fixture_index();
        assert!(index.search("zzzzqqq").is_empty());
    }

    #[test]
    fn test_short_query_is_not_a_search() {
        let (_, index) = fixture_index();
        let results = index.search("c");

        assert_eq!(results.len(), 4);
        let positions: Vec<usize> = results.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 3]);
        assert!(!is_search_query(" c ", 2));
        assert!(is_search_query("pi", 2));
    }

    #[test]
    fn test_zero_weight_fields_do_not_match() {
        let collection = RecipeCollection::new(fixture_recipes()).unwrap();
        let mut config = SearchConfig::default();
        config.weights.ingredients = 0.0;
        let index = SearchIndex::build(&collection, &config);

        assert!(index.search("cinnamon").is_empty());
    }

    #[test]
    fn test_search_result_sorting() {
        let mut results = vec![
            SearchResult {
                position: 2,
                relevance: 0.5,
            },
            SearchResult {
                position: 0,
                relevance: 0.5,
            },
            SearchResult {
                position: 1,
                relevance: 0.9,
            },
        ];

        sort_results(&mut results);

        assert_eq!(results[0].position, 1);
        assert_eq!(results[1].position, 0);
        assert_eq!(results[2].position, 2);
    }
}
