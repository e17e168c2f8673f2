//! Hybrid item-similarity model.
//!
//! Two independent vector spaces are fit over the catalog: TF-IDF over the
//! normalized descriptions and raw term counts over the metadata soups. Their
//! pairwise cosine similarities are combined by a fixed weighted sum into a
//! dense N×N matrix addressed by catalog ordinal.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

use crate::algo::tfidf::{CountVectorizer, TfidfVectorizer};
use crate::catalog::Catalog;
use crate::config::RecommenderConfig;

pub const DESCRIPTION_WEIGHT: f64 = 2.0;
pub const METADATA_WEIGHT: f64 = 1.0;

/// Weights of the two similarity channels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HybridWeights {
    pub description: f64,
    pub metadata: f64,
}

impl Default for HybridWeights {
    fn default() -> Self {
        Self {
            description: DESCRIPTION_WEIGHT,
            metadata: METADATA_WEIGHT,
        }
    }
}

impl From<&RecommenderConfig> for HybridWeights {
    fn from(config: &RecommenderConfig) -> Self {
        Self {
            description: config.description_weight,
            metadata: config.metadata_weight,
        }
    }
}

/// Immutable square similarity matrix, row-major.
#[derive(Debug, Clone, Default)]
pub struct SimilarityModel {
    n: usize,
    scores: Vec<f64>,
}

impl SimilarityModel {
    /// Fit the hybrid model:
    /// `weights.description * cos(tfidf) + weights.metadata * cos(counts)`.
    pub fn fit(catalog: &Catalog, weights: HybridWeights) -> Self {
        let started = Instant::now();
        let descriptions: Vec<&str> = catalog.items().iter().map(|i| i.description()).collect();
        let soups: Vec<&str> = catalog.items().iter().map(|i| i.soup()).collect();

        let tfidf = TfidfVectorizer.fit_transform(&descriptions);
        let counts = CountVectorizer.fit_transform(&soups);
        let count_norms: Vec<f64> = counts.rows().iter().map(|r| r.norm()).collect();

        let n = catalog.len();
        let text_rows = tfidf.rows();
        let meta_rows = counts.rows();

        // TF-IDF rows are unit length, so their dot product is already the
        // cosine. Count rows are divided by their norms here.
        let mut scores = vec![0.0; n * n];
        if n > 0 {
            scores.par_chunks_mut(n).enumerate().for_each(|(i, row)| {
                for (j, cell) in row.iter_mut().enumerate() {
                    let text = text_rows[i].dot(&text_rows[j]);
                    let denom = count_norms[i] * count_norms[j];
                    let meta = if denom == 0.0 {
                        0.0
                    } else {
                        meta_rows[i].dot(&meta_rows[j]) / denom
                    };
                    *cell = weights.description * text + weights.metadata * meta;
                }
            });
        }

        info!(
            items = n,
            description_terms = tfidf.vocabulary_len(),
            metadata_terms = counts.vocabulary_len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "similarity model fit"
        );
        Self { n, scores }
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Similarity row of item `ordinal`.
    ///
    /// # Panics
    /// If `ordinal` is not a row of the model.
    pub fn row(&self, ordinal: usize) -> &[f64] {
        assert!(ordinal < self.n, "ordinal {ordinal} out of range for model of {} items", self.n);
        &self.scores[ordinal * self.n..(ordinal + 1) * self.n]
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.row(i)[j]
    }

    /// Up to `k` ordinals most similar to `anchor`, highest score first.
    /// The anchor itself is never returned; equal scores keep ascending
    /// ordinal order.
    pub fn neighbors(&self, anchor: usize, k: usize) -> Vec<usize> {
        let row = self.row(anchor);
        let mut ranked: Vec<usize> = (0..self.n).filter(|&j| j != anchor).collect();
        ranked.sort_by(|&a, &b| row[b].total_cmp(&row[a]));
        ranked.truncate(k);
        ranked
    }
}
