use crate::model::{Category, Difficulty, ParseValueError, Season};
use crate::sort::SortBy;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

const ALL: &str = "all";

/// A single-choice facet selection. `All` is the "no constraint" sentinel
/// and reads and writes as the string `"all"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

impl<T> Selection<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn selected(&self) -> Option<&T> {
        match self {
            Selection::All => None,
            Selection::Only(value) => Some(value),
        }
    }
}

impl<T> From<T> for Selection<T> {
    fn from(value: T) -> Self {
        Selection::Only(value)
    }
}

impl<T: FromStr<Err = ParseValueError>> FromStr for Selection<T> {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL {
            Ok(Selection::All)
        } else {
            s.parse().map(Selection::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL),
            Selection::Only(value) => fmt::Display::fmt(value, f),
        }
    }
}

impl<T: fmt::Display> Serialize for Selection<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T: FromStr<Err = ParseValueError>> Deserialize<'de> for Selection<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Named cook-time ranges.
///
/// The boundaries are deliberately uneven: 30 falls in `30-60`, and 60 also
/// falls in `30-60` rather than `60-120`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CookTimeBucket {
    /// `minutes < 30`
    Under30,
    /// `30 <= minutes <= 60`
    From30To60,
    /// `60 < minutes <= 120`
    From60To120,
    /// `minutes > 120`
    Over120,
}

impl CookTimeBucket {
    pub const ALL: [CookTimeBucket; 4] = [
        CookTimeBucket::Under30,
        CookTimeBucket::From30To60,
        CookTimeBucket::From60To120,
        CookTimeBucket::Over120,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CookTimeBucket::Under30 => "under-30",
            CookTimeBucket::From30To60 => "30-60",
            CookTimeBucket::From60To120 => "60-120",
            CookTimeBucket::Over120 => "over-120",
        }
    }

    pub fn contains(&self, minutes: u32) -> bool {
        match self {
            CookTimeBucket::Under30 => minutes < 30,
            CookTimeBucket::From30To60 => (30..=60).contains(&minutes),
            CookTimeBucket::From60To120 => minutes > 60 && minutes <= 120,
            CookTimeBucket::Over120 => minutes > 120,
        }
    }
}

impl FromStr for CookTimeBucket {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CookTimeBucket::ALL
            .into_iter()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| ParseValueError::new("cook time", s))
    }
}

impl fmt::Display for CookTimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the user has picked in the search box and filter panel.
///
/// Single-choice facets use [`Selection`]; multi-choice facets (dietary,
/// tags) are sets where empty means no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub search_query: String,
    pub category: Selection<Category>,
    pub dietary: BTreeSet<String>,
    pub season: Selection<Season>,
    pub difficulty: Selection<Difficulty>,
    pub cook_time: Selection<CookTimeBucket>,
    pub tags: BTreeSet<String>,
    pub sort_by: SortBy,
}

impl FilterState {
    /// Adds the dietary tag if absent, removes it if present.
    ///
    /// Returns whether the tag is selected afterwards.
    pub fn toggle_dietary(&mut self, value: impl Into<String>) -> bool {
        toggle(&mut self.dietary, value.into())
    }

    /// Adds the tag if absent, removes it if present.
    ///
    /// Returns whether the tag is selected afterwards.
    pub fn toggle_tag(&mut self, value: impl Into<String>) -> bool {
        toggle(&mut self.tags, value.into())
    }

    /// Resets the query and every facet. The sort order is kept.
    pub fn clear_filters(&mut self) {
        *self = FilterState {
            sort_by: self.sort_by,
            ..FilterState::default()
        };
    }

    /// Number of facets currently narrowing the results, counting a
    /// non-blank search query as one.
    pub fn active_filter_count(&self) -> usize {
        [
            !self.search_query.trim().is_empty(),
            !self.category.is_all(),
            !self.dietary.is_empty(),
            !self.season.is_all(),
            !self.difficulty.is_all(),
            !self.cook_time.is_all(),
            !self.tags.is_empty(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }
}

fn toggle(set: &mut BTreeSet<String>, value: String) -> bool {
    if set.remove(&value) {
        false
    } else {
        set.insert(value);
        true
    }
}
