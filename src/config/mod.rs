//! Search tuning.
//!
//! Every field has a default, so a YAML file only needs the values it
//! changes:
//!
//! ```yaml
//! threshold: 0.3
//! weights:
//!   title: 0.5
//! ```

use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Relative weight of each searchable field in the relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldWeights {
    pub title: f64,
    pub story: f64,
    pub ingredients: f64,
    pub tags: f64,
    pub category: f64,
}

impl Default for FieldWeights {
    fn default() -> Self {
        FieldWeights {
            title: 0.4,
            story: 0.2,
            ingredients: 0.2,
            tags: 0.1,
            category: 0.1,
        }
    }
}

impl FieldWeights {
    fn values(&self) -> [f64; 5] {
        [
            self.title,
            self.story,
            self.ingredients,
            self.tags,
            self.category,
        ]
    }

    pub fn total(&self) -> f64 {
        self.values().iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Highest normalized edit distance (0 = exact, 1 = nothing in common)
    /// that still counts as a match.
    pub threshold: f64,
    /// Queries shorter than this many characters do not filter by text.
    pub min_query_len: usize,
    /// Default number of results per page.
    pub page_size: usize,
    pub weights: FieldWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            threshold: 0.4,
            min_query_len: 2,
            page_size: 12,
            weights: FieldWeights::default(),
        }
    }
}

impl SearchConfig {
    /// Parses and validates a YAML config document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document means "all defaults".
        if yaml.trim().is_empty() {
            return Ok(SearchConfig::default());
        }
        let config: SearchConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML config file.
    pub fn from_path(path: &Utf8Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        let config = Self::from_yaml_str(&yaml)?;
        tracing::debug!("Loaded search config from {}: {:?}", path, config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::Invalid(format!(
                "threshold must be between 0 and 1, got {}",
                self.threshold
            )));
        }
        if self.min_query_len == 0 {
            return Err(ConfigError::Invalid(
                "min_query_len must be at least 1".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid(
                "page_size must be at least 1".to_string(),
            ));
        }
        if self
            .weights
            .values()
            .iter()
            .any(|w| !w.is_finite() || *w < 0.0)
        {
            return Err(ConfigError::Invalid(
                "field weights must be finite and non-negative".to_string(),
            ));
        }
        if self.weights.total() <= 0.0 {
            return Err(ConfigError::Invalid(
                "at least one field weight must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
