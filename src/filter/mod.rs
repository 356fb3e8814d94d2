//! Facet filtering.
//!
//! A recipe must pass every active stage (AND across facets). Inside the
//! multi-choice facets, dietary and tags, one matching value is enough
//! (OR within a facet).

use crate::model::{Recipe, Season};
use tracing::trace;

mod model;

pub use model::{CookTimeBucket, FilterState, Selection};

/// One facet filter. Stages run in `Stage::ORDER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Category,
    Dietary,
    Season,
    Difficulty,
    CookTime,
    Tags,
}

impl Stage {
    pub const ORDER: [Stage; 6] = [
        Stage::Category,
        Stage::Dietary,
        Stage::Season,
        Stage::Difficulty,
        Stage::CookTime,
        Stage::Tags,
    ];

    /// Whether this stage constrains anything under `filters`.
    pub fn is_active(&self, filters: &FilterState) -> bool {
        match self {
            Stage::Category => !filters.category.is_all(),
            Stage::Dietary => !filters.dietary.is_empty(),
            Stage::Season => !filters.season.is_all(),
            Stage::Difficulty => !filters.difficulty.is_all(),
            Stage::CookTime => !filters.cook_time.is_all(),
            Stage::Tags => !filters.tags.is_empty(),
        }
    }

    /// Whether `recipe` passes this stage. Inactive stages admit everything.
    pub fn admits(&self, filters: &FilterState, recipe: &Recipe) -> bool {
        match self {
            Stage::Category => match filters.category {
                Selection::All => true,
                Selection::Only(category) => recipe.category == Some(category),
            },
            Stage::Dietary => filters.dietary.is_empty() || recipe.has_any_dietary(&filters.dietary),
            Stage::Season => match filters.season {
                Selection::All => true,
                Selection::Only(season) => {
                    recipe.season == Some(season) || recipe.season == Some(Season::AllSeasons)
                }
            },
            Stage::Difficulty => match filters.difficulty {
                Selection::All => true,
                Selection::Only(difficulty) => recipe.difficulty == Some(difficulty),
            },
            Stage::CookTime => match filters.cook_time {
                Selection::All => true,
                Selection::Only(bucket) => bucket.contains(recipe.cook_time_minutes()),
            },
            Stage::Tags => filters.tags.is_empty() || recipe.has_any_tag(&filters.tags),
        }
    }
}

impl FilterState {
    /// Whether `recipe` passes every facet (the search query is not
    /// considered here).
    pub fn matches(&self, recipe: &Recipe) -> bool {
        Stage::ORDER.iter().all(|stage| stage.admits(self, recipe))
    }
}

/// Narrows `candidates` through every active stage, in order.
///
/// Candidate order is preserved; recipes themselves are never touched.
pub fn apply_filters<'a>(mut candidates: Vec<&'a Recipe>, filters: &FilterState) -> Vec<&'a Recipe> {
    for stage in Stage::ORDER {
        if !stage.is_active(filters) {
            continue;
        }
        let before = candidates.len();
        candidates.retain(|recipe| stage.admits(filters, recipe));
        trace!("{:?} stage kept {} of {} recipes", stage, candidates.len(), before);
    }
    candidates
}
