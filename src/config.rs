use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::algo::string_distance::Metric;
use crate::error::ConfigError;
use crate::model::{DESCRIPTION_WEIGHT, METADATA_WEIGHT};

/// Top-level configuration, loaded from an optional TOML file.
///
/// ```toml
/// [recommender]
/// description_weight = 2.0
/// metadata_weight = 1.0
///
/// [browse]
/// page_size = 5
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub recommender: RecommenderConfig,
    pub browse: BrowseConfig,
}

/// Tuning for the similarity model and query engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Weight of the description TF-IDF cosine channel.
    pub description_weight: f64,
    /// Weight of the metadata soup count-cosine channel.
    pub metadata_weight: f64,
    /// Maximum number of neighbors returned per query.
    pub top_n: usize,
    /// Number of fuzzy title matches expanded in fuzzy mode.
    pub fuzzy_candidates: usize,
    /// String metric used to score titles in fuzzy mode.
    pub fuzzy_metric: Metric,
    /// Value of the `type` column that marks a catalog row as eligible.
    pub movie_type: String,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            description_weight: DESCRIPTION_WEIGHT,
            metadata_weight: METADATA_WEIGHT,
            top_n: 10,
            fuzzy_candidates: 10,
            fuzzy_metric: Metric::Levenshtein,
            movie_type: "MOVIE".into(),
        }
    }
}

/// Settings for the filter panel and card pager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseConfig {
    pub page_size: usize,
    /// Streaming services dropped from the listing table at load.
    pub excluded_services: Vec<String>,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            page_size: 5,
            excluded_services: vec!["crunchyroll".into(), "rakuten".into()],
        }
    }
}

impl Config {
    /// Parse and validate a TOML document. Missing keys take defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = &self.recommender;
        for (name, w) in [
            ("description_weight", r.description_weight),
            ("metadata_weight", r.metadata_weight),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite and non-negative, got {w}"
                )));
            }
        }
        if r.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be at least 1".into()));
        }
        if self.browse.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".into()));
        }
        Ok(())
    }
}
