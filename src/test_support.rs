use crate::Recipe;
use serde_json::json;

/// A recipe with only a slug and a title.
pub(crate) fn recipe(slug: &str, title: &str) -> Recipe {
    serde_json::from_value(json!({ "slug": slug, "title": title })).unwrap()
}

/// The four catalogue recipes the pipeline tests are written against.
pub(crate) fn fixture_recipes() -> Vec<Recipe> {
    serde_json::from_value(json!([
        {
            "slug": "chocolate-chip-cookies",
            "title": "Chocolate Chip Cookies",
            "category": "Cookies",
            "dietary": [],
            "season": "All Seasons",
            "difficulty": "Easy",
            "cookTime": 25,
            "tags": ["classic", "chocolate"],
            "ingredients": [
                { "name": "butter", "amount": 1, "unit": "cup" },
                { "name": "brown sugar", "amount": "3/4", "unit": "cup" },
                { "name": "chocolate chips", "amount": 2, "unit": "cups" }
            ],
            "story": ["The cookie that started every Sunday brunch."],
            "date": "2024-01-15"
        },
        {
            "slug": "fudgy-vegan-brownies",
            "title": "Fudgy Vegan Brownies",
            "category": "Brownies",
            "dietary": ["Vegan"],
            "season": "All Seasons",
            "difficulty": "Easy",
            "cookTime": 35,
            "tags": ["chocolate"],
            "ingredients": [
                { "name": "cocoa powder", "amount": "1/2", "unit": "cup" },
                { "name": "flax meal", "amount": 2, "unit": "tbsp" }
            ],
            "story": ["Dark chocolate and a crackly top, no eggs needed."],
            "date": "2024-03-02"
        },
        {
            "slug": "apple-pie",
            "title": "Classic Apple Pie",
            "category": "Pies",
            "season": "Fall",
            "difficulty": "Medium",
            "cookTime": 75,
            "tags": ["fruit", "holiday"],
            "ingredients": [
                { "name": "apples", "amount": 6 },
                { "name": "cinnamon", "amount": 1, "unit": "tsp" }
            ],
            "story": ["Grandma baked this pie every harvest festival."],
            "date": "2023-10-01"
        },
        {
            "slug": "sourdough-bread",
            "title": "Rustic Sourdough Bread",
            "category": "Breads",
            "dietary": ["Vegan"],
            "season": "All Seasons",
            "difficulty": "Advanced",
            "cookTime": 180,
            "tags": ["bread", "fermented"],
            "ingredients": [
                { "name": "bread flour", "amount": 500, "unit": "g" },
                { "name": "starter", "amount": 100, "unit": "g" }
            ],
            "story": ["A slow loaf that rewards patience."],
            "date": "2023-06-20"
        }
    ]))
    .unwrap()
}
