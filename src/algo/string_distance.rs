use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strsim::{jaro_winkler, normalized_levenshtein};
use unicode_segmentation::UnicodeSegmentation;

use super::tfidf::{self, SparseVector};

/// All supported distance metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    #[default]
    Levenshtein,
    JaroWinkler,
    Cosine,
}

/// Compute string similarity (0.0 = no match, 1.0 = identical) using the specified metric.
pub fn similarity(a: &str, b: &str, metric: Metric) -> f64 {
    match metric {
        Metric::Levenshtein => normalized_levenshtein(a, b),
        Metric::JaroWinkler => jaro_winkler(a, b),
        Metric::Cosine => bigram_cosine(a, b),
    }
}

/// Scale applied to the token-level score so that a whole-string match
/// always outranks an equally good word-by-word match.
const TOKEN_SCALE: f64 = 0.9;

/// Fuzzy score of a free-text query against a title, in [0, 1].
///
/// Case-insensitive. Takes the better of a whole-string comparison and a
/// word-level one (each query word matched to its closest title word,
/// averaged), so partial and misspelled titles still score well:
/// "acton" matches "Action Hero" through the word "action".
pub fn title_score(query: &str, title: &str, metric: Metric) -> f64 {
    let q = query.trim().to_lowercase();
    let t = title.trim().to_lowercase();
    if q.is_empty() || t.is_empty() {
        return 0.0;
    }
    let full = similarity(&q, &t, metric);

    let q_words: Vec<&str> = q.unicode_words().collect();
    let t_words: Vec<&str> = t.unicode_words().collect();
    if q_words.is_empty() || t_words.is_empty() {
        return full;
    }
    let token = q_words
        .iter()
        .map(|qw| {
            t_words
                .iter()
                .map(|tw| similarity(qw, tw, metric))
                .fold(0.0, f64::max)
        })
        .sum::<f64>()
        / q_words.len() as f64;

    full.max(token * TOKEN_SCALE)
}

/// Rank `candidates` against `query` and return the best `limit` as
/// `(candidate_index, score)`, highest score first. Equal scores keep
/// candidate order.
pub fn best_matches<S: AsRef<str> + Sync>(
    query: &str,
    candidates: &[S],
    limit: usize,
    metric: Metric,
) -> Vec<(usize, f64)> {
    if query.trim().is_empty() || limit == 0 {
        return Vec::new();
    }
    let mut scored: Vec<(usize, f64)> = candidates
        .par_iter()
        .enumerate()
        .map(|(i, c)| (i, title_score(query, c.as_ref(), metric)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(limit);
    scored
}

/// Cosine similarity of character-bigram count vectors. Strings too short
/// to have a bigram only match themselves.
fn bigram_cosine(a: &str, b: &str) -> f64 {
    let (a, b) = (a.to_lowercase(), b.to_lowercase());
    let mut columns = HashMap::new();
    let va = bigram_vector(&a, &mut columns);
    let vb = bigram_vector(&b, &mut columns);
    if va.is_empty() || vb.is_empty() {
        return if a == b { 1.0 } else { 0.0 };
    }
    tfidf::cosine(&va, &vb)
}

/// Count the bigrams of `s`, assigning each new bigram the next column of
/// the shared `columns` index.
fn bigram_vector(s: &str, columns: &mut HashMap<(char, char), u32>) -> SparseVector {
    let chars: Vec<char> = s.chars().collect();
    let mut counts: HashMap<u32, u32> = HashMap::new();
    for pair in chars.windows(2) {
        let next = columns.len() as u32;
        let col = *columns.entry((pair[0], pair[1])).or_insert(next);
        *counts.entry(col).or_insert(0) += 1;
    }
    SparseVector::from_counts(counts)
}
