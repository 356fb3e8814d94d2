//! Recipe loading.
//!
//! Recipes reach the search pipeline in the shape served by
//! `GET /api/recipes`: a JSON array of recipe records. This module reads that
//! payload from a string or from disk, and also accepts YAML and directories
//! holding one recipe per file. Every loader returns a validated
//! [`RecipeCollection`].

use crate::model::{CollectionError, Recipe, RecipeCollection};
use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use tracing::{info, warn};

const RECIPE_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Errors that can occur when loading recipes.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to read recipe file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse recipe JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse recipe YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to read directory: {0}")]
    GlobError(#[from] glob::GlobError),

    #[error("Failed to create glob pattern: {0}")]
    PatternError(#[from] glob::PatternError),

    #[error("Invalid recipe collection: {0}")]
    CollectionError(#[from] CollectionError),

    #[error("Invalid recipe in {path}: {message}")]
    InvalidRecipe { path: Utf8PathBuf, message: String },

    #[error("Unsupported recipe file format: {0}")]
    UnsupportedFormat(Utf8PathBuf),

    #[error("Invalid recipe path: {0}")]
    InvalidPath(Utf8PathBuf),

    #[error("Recipe not found: {0}")]
    NotFound(String),
}

/// Parses a `GET /api/recipes` response body.
///
/// # Examples
///
/// ```
/// use brunch_find::parse_recipes;
///
/// let collection = parse_recipes(r#"[{ "slug": "jam-scones", "title": "Jam Scones" }]"#)?;
/// assert_eq!(collection.len(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_recipes(json: &str) -> Result<RecipeCollection, FetchError> {
    let recipes: Vec<Recipe> = serde_json::from_str(json)?;
    Ok(RecipeCollection::new(recipes)?)
}

/// Loads recipes from a file or a directory.
///
/// - A `.json` file holds an array of recipes.
/// - A `.yaml` or `.yml` file holds a list of recipes.
/// - A directory is searched recursively for `.json`, `.yaml` and `.yml`
///   files, each holding a single recipe. Files are read in path order and
///   blank files are skipped.
///
/// # Errors
///
/// Returns `FetchError` if the path does not exist, a file cannot be read or
/// parsed, or the recipes break the slug rules of [`RecipeCollection`].
pub fn load_recipes(path: &Utf8Path) -> Result<RecipeCollection, FetchError> {
    let recipes = if path.is_dir() {
        load_directory(path)?
    } else if path.is_file() {
        load_file(path)?
    } else {
        return Err(FetchError::InvalidPath(path.to_path_buf()));
    };

    let collection = RecipeCollection::new(recipes)?;
    info!(
        "Loaded {} recipes from {} (collection v{})",
        collection.len(),
        path,
        collection.version()
    );
    Ok(collection)
}

/// Looks up one recipe by slug, like `GET /api/recipes/:slug`.
pub fn get_recipe<'a>(collection: &'a RecipeCollection, slug: &str) -> Result<&'a Recipe, FetchError> {
    collection
        .get(slug)
        .ok_or_else(|| FetchError::NotFound(slug.to_string()))
}

fn load_file(path: &Utf8Path) -> Result<Vec<Recipe>, FetchError> {
    let content = std::fs::read_to_string(path)?;
    match path.extension() {
        Some("json") => Ok(serde_json::from_str(&content)?),
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
        _ => Err(FetchError::UnsupportedFormat(path.to_path_buf())),
    }
}

fn load_directory(dir: &Utf8Path) -> Result<Vec<Recipe>, FetchError> {
    let mut paths = Vec::new();
    for ext in RECIPE_EXTENSIONS {
        let pattern = dir.join(format!("**/*.{ext}"));
        for entry in glob::glob(pattern.as_str())? {
            let path = Utf8PathBuf::from_path_buf(entry?).map_err(|p| {
                FetchError::IoError(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("Path contains invalid UTF-8: {}", p.display()),
                ))
            })?;
            paths.push(path);
        }
    }
    paths.sort();

    let mut recipes = Vec::with_capacity(paths.len());
    for path in paths {
        let content = std::fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            warn!("Skipping empty recipe file {}", path);
            continue;
        }
        recipes.push(parse_single(&path, &content)?);
    }
    Ok(recipes)
}

fn parse_single(path: &Utf8Path, content: &str) -> Result<Recipe, FetchError> {
    let parsed = match path.extension() {
        Some("json") => serde_json::from_str(content).map_err(|e| e.to_string()),
        _ => serde_yaml::from_str(content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| FetchError::InvalidRecipe {
        path: path.to_path_buf(),
        message,
    })
}
