//! Query engine: nearest-neighbor lookups over a fitted similarity model.
//!
//! A [`Recommender`] owns its catalog and model. It can only be obtained by
//! fitting, so every query runs against a complete model, and it is
//! read-only afterwards: share it behind an `Arc` across threads freely.

use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::algo::string_distance;
use crate::catalog::{Catalog, CatalogItem};
use crate::config::RecommenderConfig;
use crate::error::CatalogResult;
use crate::model::{HybridWeights, SimilarityModel};

/// One recommended item, projected to what the dashboard cards display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
}

impl From<&CatalogItem> for Recommendation {
    fn from(item: &CatalogItem) -> Self {
        Self {
            title: item.title().to_string(),
            description: item.description().to_string(),
        }
    }
}

/// Result of a query. "Nothing found" is an ordinary outcome, not an error.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Recommendations {
    #[default]
    Empty,
    /// Ranked, most similar first. Never empty.
    Results(Vec<Recommendation>),
}

impl Recommendations {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn as_slice(&self) -> &[Recommendation] {
        match self {
            Self::Empty => &[],
            Self::Results(items) => items,
        }
    }

    pub fn into_vec(self) -> Vec<Recommendation> {
        match self {
            Self::Empty => Vec::new(),
            Self::Results(items) => items,
        }
    }

    pub fn titles(&self) -> Vec<&str> {
        self.as_slice().iter().map(|r| r.title.as_str()).collect()
    }
}

impl From<Vec<Recommendation>> for Recommendations {
    fn from(items: Vec<Recommendation>) -> Self {
        if items.is_empty() {
            Self::Empty
        } else {
            Self::Results(items)
        }
    }
}

/// A fitted recommendation service.
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Catalog,
    model: SimilarityModel,
    config: RecommenderConfig,
}

impl Recommender {
    /// Fit a model over `catalog`. The catalog is moved in so its row order
    /// can no longer change underneath the model.
    pub fn fit(catalog: Catalog, config: RecommenderConfig) -> Self {
        let model = SimilarityModel::fit(&catalog, HybridWeights::from(&config));
        Self {
            catalog,
            model,
            config,
        }
    }

    /// Load a CSV catalog and fit it.
    pub fn load(path: &Path, config: RecommenderConfig) -> CatalogResult<Self> {
        let catalog = Catalog::load(path, &config.movie_type)?;
        Ok(Self::fit(catalog, config))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn model(&self) -> &SimilarityModel {
        &self.model
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Items most similar to the first catalog item titled exactly `title`.
    pub fn recommend(&self, title: &str) -> Recommendations {
        if title.trim().is_empty() {
            return Recommendations::Empty;
        }
        let Some(anchor) = self.catalog.position_of(title) else {
            debug!(title, "no catalog item with this title");
            return Recommendations::Empty;
        };
        self.neighbors_of(anchor).into()
    }

    /// Resolve `query` to the closest catalog titles, best first.
    pub fn match_titles(&self, query: &str) -> Vec<&str> {
        let titles = self.catalog.distinct_titles();
        string_distance::best_matches(
            query,
            &titles,
            self.config.fuzzy_candidates,
            self.config.fuzzy_metric,
        )
        .into_iter()
        .filter(|&(_, score)| score > 0.0)
        .map(|(idx, _)| titles[idx])
        .collect()
    }

    /// Fuzzy mode: expand each of the closest matching titles, pool their
    /// neighbors in order, drop repeated (title, description) pairs and keep
    /// the first `top_n`.
    pub fn recommend_fuzzy(&self, query: &str) -> Recommendations {
        if query.trim().is_empty() {
            return Recommendations::Empty;
        }
        let matched = self.match_titles(query);
        debug!(query, matched = ?matched, "fuzzy title resolution");

        let mut seen = HashSet::new();
        let pooled: Vec<Recommendation> = matched
            .iter()
            .flat_map(|title| self.recommend(title).into_vec())
            .filter(|r| seen.insert(r.clone()))
            .take(self.config.top_n)
            .collect();
        pooled.into()
    }

    fn neighbors_of(&self, anchor: usize) -> Vec<Recommendation> {
        self.model
            .neighbors(anchor, self.config.top_n)
            .into_iter()
            .filter_map(|ordinal| self.catalog.get(ordinal))
            .map(Recommendation::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, description: &str) -> CatalogItem {
        CatalogItem::new(title, description, Some(vec![]), &[], "")
    }

    #[test]
    fn recommendations_from_vec() {
        assert!(Recommendations::from(vec![]).is_empty());
        let r = Recommendations::from(vec![Recommendation {
            title: "A".into(),
            description: "a".into(),
        }]);
        assert_eq!(r.len(), 1);
        assert_eq!(r.titles(), vec!["A"]);
    }

    #[test]
    fn empty_title_is_empty() {
        let rec = Recommender::fit(
            Catalog::new(vec![item("A", "hero"), item("B", "hero")]),
            RecommenderConfig::default(),
        );
        assert_eq!(rec.recommend(""), Recommendations::Empty);
        assert_eq!(rec.recommend("   "), Recommendations::Empty);
        assert_eq!(rec.recommend_fuzzy(""), Recommendations::Empty);
    }

    #[test]
    fn top_n_limits_results() {
        let items = (0..20).map(|i| item(&format!("T{i}"), "shared words here")).collect();
        let config = RecommenderConfig {
            top_n: 3,
            ..RecommenderConfig::default()
        };
        let rec = Recommender::fit(Catalog::new(items), config);
        assert_eq!(rec.recommend("T0").titles(), vec!["T1", "T2", "T3"]);
    }

    #[test]
    fn single_item_catalog_has_no_neighbors() {
        let rec = Recommender::fit(Catalog::new(vec![item("Solo", "alone")]), RecommenderConfig::default());
        assert_eq!(rec.recommend("Solo"), Recommendations::Empty);
    }

    #[test]
    fn recommender_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Recommender>();
    }
}
