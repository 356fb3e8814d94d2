use crate::model::{ParseValueError, Recipe};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Result ordering offered by the sort dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortBy {
    /// Most recent `date` first; undated recipes last.
    #[default]
    #[serde(rename = "newest")]
    Newest,
    #[serde(rename = "oldest")]
    Oldest,
    #[serde(rename = "a-z")]
    AToZ,
    #[serde(rename = "z-a")]
    ZToA,
    /// Shortest cook time first; unknown cook time counts as 0.
    #[serde(rename = "quick-first")]
    QuickFirst,
    #[serde(rename = "complex-first")]
    ComplexFirst,
}

impl SortBy {
    pub const ALL: [SortBy; 6] = [
        SortBy::Newest,
        SortBy::Oldest,
        SortBy::AToZ,
        SortBy::ZToA,
        SortBy::QuickFirst,
        SortBy::ComplexFirst,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Newest => "newest",
            SortBy::Oldest => "oldest",
            SortBy::AToZ => "a-z",
            SortBy::ZToA => "z-a",
            SortBy::QuickFirst => "quick-first",
            SortBy::ComplexFirst => "complex-first",
        }
    }

    /// Total order on recipes for this sort key.
    pub fn compare(&self, a: &Recipe, b: &Recipe) -> Ordering {
        match self {
            SortBy::Newest => b.date_key().cmp(a.date_key()),
            SortBy::Oldest => a.date_key().cmp(b.date_key()),
            SortBy::AToZ => compare_titles(&a.title, &b.title),
            SortBy::ZToA => compare_titles(&b.title, &a.title),
            SortBy::QuickFirst => a.cook_time_minutes().cmp(&b.cook_time_minutes()),
            SortBy::ComplexFirst => b.cook_time_minutes().cmp(&a.cook_time_minutes()),
        }
    }
}

impl FromStr for SortBy {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortBy::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| ParseValueError::new("sort", s))
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort recipes in place. Ties keep their incoming order.
pub fn sort_recipes(recipes: &mut [&Recipe], sort_by: SortBy) {
    recipes.sort_by(|a, b| sort_by.compare(a, b));
}

// Case-insensitive first so "apple" and "Apple" sit together, then the raw
// strings so the order is still total.
fn compare_titles(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture_recipes, recipe};

    fn sorted_slugs(recipes: &[Recipe], sort_by: SortBy) -> Vec<&str> {
        let mut refs: Vec<&Recipe> = recipes.iter().collect();
        sort_recipes(&mut refs, sort_by);
        refs.iter().map(|r| r.slug.as_str()).collect()
    }

    #[test]
    fn test_sort_by_date() {
        let recipes = fixture_recipes();

        assert_eq!(
            sorted_slugs(&recipes, SortBy::Newest),
            vec![
                "fudgy-vegan-brownies",
                "chocolate-chip-cookies",
                "apple-pie",
                "sourdough-bread"
            ]
        );
        assert_eq!(
            sorted_slugs(&recipes, SortBy::Oldest),
            vec![
                "sourdough-bread",
                "apple-pie",
                "chocolate-chip-cookies",
                "fudgy-vegan-brownies"
            ]
        );
    }

    #[test]
    fn test_undated_recipes_sort_last_when_newest() {
        let mut recipes = fixture_recipes();
        recipes.push(recipe("mystery-muffin", "Mystery Muffin"));

        let newest = sorted_slugs(&recipes, SortBy::Newest);
        assert_eq!(newest.last(), Some(&"mystery-muffin"));
        let oldest = sorted_slugs(&recipes, SortBy::Oldest);
        assert_eq!(oldest.first(), Some(&"mystery-muffin"));
    }

    #[test]
    fn test_sort_by_title() {
        let recipes = fixture_recipes();

        assert_eq!(
            sorted_slugs(&recipes, SortBy::AToZ),
            vec![
                "chocolate-chip-cookies",
                "apple-pie",
                "fudgy-vegan-brownies",
                "sourdough-bread"
            ]
        );
        assert_eq!(
            sorted_slugs(&recipes, SortBy::ZToA),
            vec![
                "sourdough-bread",
                "fudgy-vegan-brownies",
                "apple-pie",
                "chocolate-chip-cookies"
            ]
        );
    }

    #[test]
    fn test_title_compare_ignores_case_first() {
        assert_eq!(compare_titles("apple tart", "Banana Bread"), Ordering::Less);
        assert_eq!(compare_titles("Zucchini", "apple"), Ordering::Greater);
        assert_ne!(compare_titles("Apple", "apple"), Ordering::Equal);
    }

    #[test]
    fn test_sort_by_cook_time() {
        let mut recipes = fixture_recipes();
        recipes.push(recipe("no-bake-bars", "No Bake Bars"));

        assert_eq!(
            sorted_slugs(&recipes, SortBy::QuickFirst),
            vec![
                "no-bake-bars",
                "chocolate-chip-cookies",
                "fudgy-vegan-brownies",
                "apple-pie",
                "sourdough-bread"
            ]
        );
        assert_eq!(
            sorted_slugs(&recipes, SortBy::ComplexFirst).first(),
            Some(&"sourdough-bread")
        );
    }

    #[test]
    fn test_every_order_is_total() {
        let recipes = fixture_recipes();
        for sort_by in SortBy::ALL {
            let mut refs: Vec<&Recipe> = recipes.iter().collect();
            sort_recipes(&mut refs, sort_by);
            for pair in refs.windows(2) {
                assert_ne!(
                    sort_by.compare(pair[0], pair[1]),
                    Ordering::Greater,
                    "{} out of order",
                    sort_by
                );
            }
        }
    }

    #[test]
    fn test_ties_keep_input_order() {
        let recipes = vec![recipe("b-scone", "Scone"), recipe("a-scone", "Scone")];
        assert_eq!(
            sorted_slugs(&recipes, SortBy::QuickFirst),
            vec!["b-scone", "a-scone"]
        );
    }

    #[test]
    fn test_sort_by_parsing() {
        assert_eq!("complex-first".parse::<SortBy>().unwrap(), SortBy::ComplexFirst);
        assert_eq!(SortBy::default(), SortBy::Newest);
        assert!("newest-first".parse::<SortBy>().is_err());
        assert_eq!(serde_json::to_string(&SortBy::ZToA).unwrap(), "\"z-a\"");
    }
}
