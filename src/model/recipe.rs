use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// Error returned when a string is not a member of one of the closed
/// enumerations (category, season, difficulty, cook-time bucket, sort order).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid {kind} value: {value:?}")]
pub struct ParseValueError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseValueError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Recipe category as shown in the category picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Cookies,
    Cakes,
    Cupcakes,
    Brownies,
    Bars,
    Pies,
    Tarts,
    Breads,
    Pastries,
    Muffins,
    Scones,
    Breakfast,
}

impl Category {
    pub const ALL: [Category; 12] = [
        Category::Cookies,
        Category::Cakes,
        Category::Cupcakes,
        Category::Brownies,
        Category::Bars,
        Category::Pies,
        Category::Tarts,
        Category::Breads,
        Category::Pastries,
        Category::Muffins,
        Category::Scones,
        Category::Breakfast,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cookies => "Cookies",
            Category::Cakes => "Cakes",
            Category::Cupcakes => "Cupcakes",
            Category::Brownies => "Brownies",
            Category::Bars => "Bars",
            Category::Pies => "Pies",
            Category::Tarts => "Tarts",
            Category::Breads => "Breads",
            Category::Pastries => "Pastries",
            Category::Muffins => "Muffins",
            Category::Scones => "Scones",
            Category::Breakfast => "Breakfast",
        }
    }
}

/// Season a recipe belongs to. `AllSeasons` matches every season filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
    #[serde(rename = "All Seasons")]
    AllSeasons,
}

impl Season {
    pub const ALL: [Season; 5] = [
        Season::Spring,
        Season::Summer,
        Season::Fall,
        Season::Winter,
        Season::AllSeasons,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
            Season::Winter => "Winter",
            Season::AllSeasons => "All Seasons",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Advanced,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl FromStr for Category {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseValueError::new("category", s))
    }
}

impl FromStr for Season {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Season::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ParseValueError::new("season", s))
    }
}

impl FromStr for Difficulty {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ParseValueError::new("difficulty", s))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single ingredient line.
///
/// `amount` accepts either a JSON number or a string ("1/2", "a pinch").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub amount: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

/// A recipe record as served by `GET /api/recipes`.
///
/// Records are read-only inputs: nothing in the search pipeline mutates them.
/// Optional fields never fail a load. Absent keys, `null` and values of the
/// wrong shape all read as the field's default: a `cookTime` given as a
/// numeric string is still read, a single `dietary` or `tags` string becomes
/// a one-item list, and an unknown category, season or difficulty reads as
/// absent.
///
/// # Examples
///
/// ```
/// # use brunch_find::Recipe;
/// let recipe: Recipe = serde_json::from_str(r#"{
///     "slug": "lemon-bars",
///     "title": "Lemon Bars",
///     "category": "Bars",
///     "cookTime": "40",
///     "tags": "citrus"
/// }"#)?;
///
/// assert_eq!(recipe.cook_time_minutes(), 40);
/// assert_eq!(recipe.date_key(), "");
/// assert_eq!(recipe.tags, vec!["citrus"]);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub slug: String,
    pub title: String,
    #[serde(default, deserialize_with = "lenient_vocabulary", skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub dietary: Vec<String>,
    #[serde(default, deserialize_with = "lenient_vocabulary", skip_serializing_if = "Option::is_none")]
    pub season: Option<Season>,
    #[serde(default, deserialize_with = "lenient_vocabulary", skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(default, deserialize_with = "lenient_minutes", skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<u32>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub ingredients: Vec<Ingredient>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub story: Vec<String>,
    #[serde(default, deserialize_with = "lenient_date", skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Recipe {
    /// Cook time in minutes, `0` when unknown.
    pub fn cook_time_minutes(&self) -> u32 {
        self.cook_time.unwrap_or(0)
    }

    /// The publication date used for ordering, `""` when unknown.
    pub fn date_key(&self) -> &str {
        self.date.as_deref().unwrap_or("")
    }

    pub fn has_any_dietary<S: AsRef<str>>(&self, wanted: impl IntoIterator<Item = S>) -> bool {
        intersects(&self.dietary, wanted)
    }

    pub fn has_any_tag<S: AsRef<str>>(&self, wanted: impl IntoIterator<Item = S>) -> bool {
        intersects(&self.tags, wanted)
    }
}

fn intersects<S: AsRef<str>>(have: &[String], wanted: impl IntoIterator<Item = S>) -> bool {
    wanted
        .into_iter()
        .any(|w| have.iter().any(|h| h == w.as_ref()))
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Amount>::deserialize(deserializer)?.map(|amount| match amount {
        Amount::Text(text) => text,
        Amount::Number(number) => number.to_string(),
    }))
}

// Reads any JSON/YAML shape so that a malformed optional field falls back to
// its default instead of failing the whole payload.
fn loose_value<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.unwrap_or(Value::Null))
}

fn lenient_minutes<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let minutes = match loose_value(deserializer)? {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.trim().parse::<u32>().ok(),
        _ => None,
    };
    Ok(minutes)
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let list = match loose_value(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(text),
                _ => None,
            })
            .collect(),
        Value::String(text) if !text.trim().is_empty() => vec![text],
        _ => Vec::new(),
    };
    Ok(list)
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match loose_value(deserializer)? {
        Value::String(text) => Ok(Some(text)),
        _ => Ok(None),
    }
}

fn lenient_vocabulary<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = ParseValueError>,
{
    match loose_value(deserializer)? {
        Value::String(text) => match text.parse() {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!("{}, reading it as absent", err);
                Ok(None)
            }
        },
        Value::Null => Ok(None),
        other => {
            warn!("Ignoring non-string recipe field value {}", other);
            Ok(None)
        }
    }
}
