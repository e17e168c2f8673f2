//! Shared operation wrappers for the CLI and host applications.
//!
//! Each `op_*` function is a pure, synchronous wrapper around the engine and
//! browse layer. Output is `serde_json::Value`, ready for a UI to render
//! page by page.

use serde::Serialize;
use serde_json::{json, Value};

use crate::algo::tokenizer;
use crate::browse::{paginate, FilterCriteria, Listings, Page};
use crate::engine::Recommender;

/// Which query mode to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    Exact,
    Fuzzy,
}

impl QueryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Fuzzy => "fuzzy",
        }
    }
}

fn page_json<T: Serialize>(page: Page<T>) -> Value {
    json!({
        "results": page.items,
        "page": page.page,
        "total_pages": page.total_pages,
        "total_items": page.total_items,
    })
}

pub fn op_recommend(
    recommender: &Recommender,
    query: &str,
    mode: QueryMode,
    page: usize,
    page_size: usize,
) -> Value {
    let recommendations = match mode {
        QueryMode::Exact => recommender.recommend(query),
        QueryMode::Fuzzy => recommender.recommend_fuzzy(query),
    };
    let mut out = page_json(paginate(recommendations.as_slice(), page, page_size));
    out["query"] = Value::String(query.to_string());
    out["mode"] = Value::String(mode.as_str().into());
    if mode == QueryMode::Fuzzy {
        out["matched_titles"] = json!(recommender.match_titles(query));
    }
    out
}

pub fn op_filter(
    listings: &Listings,
    criteria: &FilterCriteria,
    page: usize,
    page_size: usize,
) -> Value {
    let matched = listings.filter(criteria);
    page_json(paginate(&matched, page, page_size))
}

pub fn op_facets(listings: &Listings) -> Value {
    json!({
        "genres": listings.unique_genres(),
        "services": listings.services(),
        "year_bounds": listings.year_bounds(),
        "total_listings": listings.len(),
    })
}

pub fn op_normalize(text: &str) -> Value {
    json!({
        "input": text,
        "normalized": tokenizer::normalize_str(text),
    })
}
