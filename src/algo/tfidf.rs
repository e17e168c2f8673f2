use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::tokenizer;

/// A sparse row vector: `(term_index, weight)` pairs sorted by term index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    entries: Vec<(u32, f64)>,
}

impl SparseVector {
    pub(crate) fn from_counts(counts: HashMap<u32, u32>) -> Self {
        let mut entries: Vec<(u32, f64)> = counts
            .into_iter()
            .map(|(idx, count)| (idx, count as f64))
            .collect();
        entries.sort_unstable_by_key(|&(idx, _)| idx);
        Self { entries }
    }

    pub fn entries(&self) -> &[(u32, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dot product via a merge over the sorted indices. The products are
    /// accumulated in ascending index order, so `a.dot(b) == b.dot(a)`
    /// bit for bit.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (ia, va) = self.entries[i];
            let (ib, vb) = other.entries[j];
            match ia.cmp(&ib) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += va * vb;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|&(_, v)| v * v).sum::<f64>().sqrt()
    }

    /// Scale to unit L2 norm. Zero vectors are left untouched.
    pub fn l2_normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, v) in &mut self.entries {
                *v /= norm;
            }
        }
    }
}

/// Cosine similarity of two sparse vectors; 0.0 when either is all zeros.
pub fn cosine(a: &SparseVector, b: &SparseVector) -> f64 {
    let denom = a.norm() * b.norm();
    if denom == 0.0 {
        return 0.0;
    }
    a.dot(b) / denom
}

/// A document-term matrix with the vocabulary it was fit on.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TermMatrix {
    /// term -> column index (columns are assigned in sorted term order)
    vocabulary: HashMap<String, u32>,
    rows: Vec<SparseVector>,
}

impl TermMatrix {
    pub fn rows(&self) -> &[SparseVector] {
        &self.rows
    }

    pub fn num_docs(&self) -> usize {
        self.rows.len()
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn term_index(&self, term: &str) -> Option<u32> {
        self.vocabulary.get(term).copied()
    }

    /// Weight of `term` in document `doc_idx`, 0.0 if absent.
    pub fn weight(&self, doc_idx: usize, term: &str) -> f64 {
        let Some(col) = self.term_index(term) else {
            return 0.0;
        };
        self.rows[doc_idx]
            .entries
            .binary_search_by_key(&col, |&(idx, _)| idx)
            .map(|pos| self.rows[doc_idx].entries[pos].1)
            .unwrap_or(0.0)
    }
}

/// Raw term-count vectorizer. The vocabulary is learned from the corpus
/// passed to [`CountVectorizer::fit_transform`] only.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountVectorizer;

impl CountVectorizer {
    pub fn fit_transform<S: AsRef<str>>(&self, docs: &[S]) -> TermMatrix {
        let token_lists: Vec<Vec<String>> =
            docs.iter().map(|d| tokenizer::analyze(d.as_ref())).collect();

        let terms: BTreeSet<&str> = token_lists
            .iter()
            .flat_map(|tokens| tokens.iter().map(String::as_str))
            .collect();
        let vocabulary: HashMap<String, u32> = terms
            .into_iter()
            .enumerate()
            .map(|(i, t)| (t.to_string(), i as u32))
            .collect();

        let rows = token_lists
            .iter()
            .map(|tokens| {
                let mut counts: HashMap<u32, u32> = HashMap::new();
                for token in tokens {
                    *counts.entry(vocabulary[token.as_str()]).or_insert(0) += 1;
                }
                SparseVector::from_counts(counts)
            })
            .collect();

        TermMatrix { vocabulary, rows }
    }
}

/// TF-IDF vectorizer: raw term counts scaled by smoothed inverse document
/// frequency `ln((1 + n) / (1 + df)) + 1`, each row L2-normalized.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfidfVectorizer;

impl TfidfVectorizer {
    pub fn fit_transform<S: AsRef<str>>(&self, docs: &[S]) -> TermMatrix {
        let mut matrix = CountVectorizer.fit_transform(docs);

        let mut doc_freq = vec![0u32; matrix.vocabulary.len()];
        for row in &matrix.rows {
            for &(idx, _) in &row.entries {
                doc_freq[idx as usize] += 1;
            }
        }
        let n = matrix.rows.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        for row in &mut matrix.rows {
            for (idx, v) in &mut row.entries {
                *v *= idf[*idx as usize];
            }
            row.l2_normalize();
        }
        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Vec<&'static str> {
        vec![
            "rust programming language",
            "rust systems performance",
            "javascript web programming",
        ]
    }

    #[test]
    fn count_vocabulary_is_sorted() {
        let m = CountVectorizer.fit_transform(&docs());
        assert_eq!(m.vocabulary_len(), 7);
        assert_eq!(m.term_index("javascript"), Some(0));
        assert_eq!(m.term_index("web"), Some(6));
    }

    #[test]
    fn count_weights_are_raw() {
        let m = CountVectorizer.fit_transform(&["action action hero"]);
        assert_eq!(m.weight(0, "action"), 2.0);
        assert_eq!(m.weight(0, "hero"), 1.0);
        assert_eq!(m.weight(0, "villain"), 0.0);
    }

    #[test]
    fn tfidf_rows_unit_norm() {
        let m = TfidfVectorizer.fit_transform(&docs());
        for row in m.rows() {
            assert!((row.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn tfidf_rare_term_weighs_more() {
        let m = TfidfVectorizer.fit_transform(&docs());
        // "systems" appears in 1/3 docs, "rust" in 2/3
        assert!(m.weight(1, "systems") > m.weight(1, "rust"));
    }

    #[test]
    fn tfidf_empty_document_is_zero_vector() {
        let m = TfidfVectorizer.fit_transform(&["", "hero"]);
        assert!(m.rows()[0].is_empty());
        assert_eq!(cosine(&m.rows()[0], &m.rows()[1]), 0.0);
    }

    #[test]
    fn empty_corpus() {
        let m = TfidfVectorizer.fit_transform::<&str>(&[]);
        assert_eq!(m.num_docs(), 0);
        assert_eq!(m.vocabulary_len(), 0);
    }

    #[test]
    fn dot_is_symmetric() {
        let m = TfidfVectorizer.fit_transform(&docs());
        let (a, b) = (&m.rows()[0], &m.rows()[2]);
        assert_eq!(a.dot(b), b.dot(a));
        assert!(a.dot(b) > 0.0);
    }

    #[test]
    fn cosine_identical_is_one() {
        let m = CountVectorizer.fit_transform(&["action hero", "action hero"]);
        assert!((cosine(&m.rows()[0], &m.rows()[1]) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn matrix_serde_roundtrip() {
        let m = TfidfVectorizer.fit_transform(&docs());
        let json = serde_json::to_string(&m).unwrap();
        let m2: TermMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(m.rows(), m2.rows());
    }
}
