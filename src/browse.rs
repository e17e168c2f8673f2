//! Browse layer: the dashboard's filter panel and card pager.
//!
//! Works on the full listing table (every item type, every service except
//! the excluded ones), independent of the recommendation catalog.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::algo::literal;
use crate::catalog::read_rows;
use crate::config::BrowseConfig;
use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Clone, Default, Deserialize)]
struct ListingRecord {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    genres: Option<String>,
    #[serde(default)]
    release_year: Option<String>,
    #[serde(default)]
    imdb_score: Option<String>,
    #[serde(default)]
    streaming_service: Option<String>,
}

/// One row of the listing table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub genres: Vec<String>,
    pub release_year: Option<i32>,
    pub imdb_score: Option<f64>,
    pub streaming_service: String,
}

impl Listing {
    fn from_record(record: ListingRecord) -> Self {
        Self {
            title: record.title.unwrap_or_default(),
            description: record.description.unwrap_or_default(),
            kind: record.kind.unwrap_or_default(),
            genres: record
                .genres
                .as_deref()
                .map(literal::split_loose)
                .unwrap_or_default(),
            release_year: parse_number(record.release_year.as_deref()).map(|y| y as i32),
            imdb_score: parse_number(record.imdb_score.as_deref()),
            streaming_service: record.streaming_service.unwrap_or_default(),
        }
    }
}

fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Filter panel selections. Unset fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Keep listings having any of these genres.
    #[serde(default)]
    pub genres: Vec<String>,
    /// Inclusive release year range.
    #[serde(default)]
    pub year_range: Option<(i32, i32)>,
    /// Minimum IMDb score. Zero means "any rating", as on the slider.
    #[serde(default)]
    pub min_rating: Option<f64>,
    #[serde(default)]
    pub service: Option<String>,
}

impl FilterCriteria {
    pub fn matches(&self, listing: &Listing) -> bool {
        if !self.genres.is_empty() && !listing.genres.iter().any(|g| self.genres.contains(g)) {
            return false;
        }
        if let Some((from, to)) = self.year_range {
            match listing.release_year {
                Some(year) if year >= from && year <= to => {}
                _ => return false,
            }
        }
        if let Some(min) = self.min_rating.filter(|&m| m > 0.0) {
            match listing.imdb_score {
                Some(score) if score >= min => {}
                _ => return false,
            }
        }
        if let Some(service) = self.service.as_deref().filter(|s| !s.is_empty()) {
            if listing.streaming_service != service {
                return false;
            }
        }
        true
    }
}

/// The listing table.
#[derive(Debug, Clone, Default)]
pub struct Listings {
    items: Vec<Listing>,
}

impl Listings {
    pub fn new(items: Vec<Listing>) -> Self {
        Self { items }
    }

    pub fn from_reader<R: Read>(reader: R, config: &BrowseConfig) -> CatalogResult<Self> {
        let (records, skipped) = read_rows::<ListingRecord, _>(reader, "listings")?;
        let mut excluded = 0usize;
        let items: Vec<Listing> = records
            .into_iter()
            .map(Listing::from_record)
            .filter(|listing| {
                let keep = !config.excluded_services.contains(&listing.streaming_service);
                excluded += usize::from(!keep);
                keep
            })
            .collect();
        info!(listings = items.len(), skipped, excluded, "listings loaded");
        Ok(Self { items })
    }

    pub fn load(path: &Path, config: &BrowseConfig) -> CatalogResult<Self> {
        let file = std::fs::File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(std::io::BufReader::new(file), config)
    }

    pub fn items(&self) -> &[Listing] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Listings passing `criteria`, in table order.
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<&Listing> {
        self.items.iter().filter(|l| criteria.matches(l)).collect()
    }

    /// All genres, sorted.
    pub fn unique_genres(&self) -> Vec<&str> {
        let genres: BTreeSet<&str> = self
            .items
            .iter()
            .flat_map(|l| l.genres.iter().map(String::as_str))
            .filter(|g| !g.is_empty())
            .collect();
        genres.into_iter().collect()
    }

    /// Streaming services in first-seen order.
    pub fn services(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .map(|l| l.streaming_service.as_str())
            .filter(|s| !s.is_empty() && seen.insert(*s))
            .collect()
    }

    /// Earliest and latest release year, if any listing has one.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let years = self.items.iter().filter_map(|l| l.release_year);
        let min = years.clone().min()?;
        let max = years.max()?;
        Some((min, max))
    }
}

/// One page of a result list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slice `items` into the 1-based `page` of size `page_size`. Out-of-range
/// pages are clamped; an empty list has one empty page.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_pages = items.len().div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(items.len());
    Page {
        items: items.get(start..end).unwrap_or_default().to_vec(),
        page,
        total_pages,
        total_items: items.len(),
    }
}
