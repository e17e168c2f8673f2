//! Catalog loading: raw CSV rows in, cleaned ordinal-indexed items out.
//!
//! The loader favors availability over strict validation. A malformed field
//! degrades to an empty value and is logged; only an unreadable source
//! aborts the load.

use csv::{ByteRecord, StringRecord};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::algo::{literal, tokenizer};
use crate::error::{CatalogError, CatalogResult};

/// One row of the raw item table. Every column is optional; extra columns
/// in the source are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Serialized list literal, e.g. `['drama', 'crime']`.
    #[serde(default)]
    pub genres: Option<String>,
    /// Serialized list literal of cast names, top-billed first.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "primaryName", default)]
    pub primary_name: Option<String>,
}

/// A cleaned catalog row. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogItem {
    title: String,
    description: String,
    /// `None` marks a genre field that failed to parse.
    genres: Option<Vec<String>>,
    lead_cast: Vec<String>,
    primary_contributor: String,
    soup: String,
}

impl CatalogItem {
    /// Build an item from already-parsed fields. The description is
    /// normalized, cast and contributor are lower-stripped, the cast is cut
    /// to its top entry, and the soup is derived.
    pub fn new(
        title: impl Into<String>,
        description: &str,
        genres: Option<Vec<String>>,
        cast: &[String],
        primary_contributor: &str,
    ) -> Self {
        let lead_cast = tokenizer::top_n(tokenizer::lower_strip_list(Some(cast)), 1);
        let primary_contributor = tokenizer::lower_strip_scalar(Some(primary_contributor));
        let soup = build_soup(
            genres.as_deref().unwrap_or_default(),
            &lead_cast,
            &primary_contributor,
        );
        Self {
            title: title.into(),
            description: tokenizer::normalize_str(description),
            genres,
            lead_cast,
            primary_contributor,
            soup,
        }
    }

    /// Clean a raw record field by field.
    pub fn from_record(record: &RawRecord) -> Self {
        let title = record.title.clone().unwrap_or_default();
        let genres = parse_genres(record.genres.as_deref(), &title);
        let cast = parse_cast(record.name.as_deref(), &title);
        let lead_cast = tokenizer::top_n(tokenizer::lower_strip_list(cast.as_deref()), 1);
        let primary_contributor = tokenizer::lower_strip_scalar(record.primary_name.as_deref());
        let soup = build_soup(
            genres.as_deref().unwrap_or_default(),
            &lead_cast,
            &primary_contributor,
        );
        Self {
            description: tokenizer::normalize(record.description.as_deref()),
            title,
            genres,
            lead_cast,
            primary_contributor,
            soup,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn genres(&self) -> Option<&[String]> {
        self.genres.as_deref()
    }

    pub fn lead_cast(&self) -> &[String] {
        &self.lead_cast
    }

    pub fn primary_contributor(&self) -> &str {
        &self.primary_contributor
    }

    pub fn soup(&self) -> &str {
        &self.soup
    }
}

/// Concatenate metadata into one bag-of-words string: genres, a space, the
/// lead cast, a space, the primary contributor. Empty parts contribute no
/// tokens but their separating spaces remain.
pub fn build_soup(genres: &[String], lead_cast: &[String], primary_contributor: &str) -> String {
    format!(
        "{} {} {}",
        genres.join(" "),
        lead_cast.join(" "),
        primary_contributor
    )
}

fn parse_genres(raw: Option<&str>, title: &str) -> Option<Vec<String>> {
    let parsed = raw.and_then(literal::parse_string_list);
    if parsed.is_none() {
        debug!(title, raw = raw.unwrap_or(""), "unparseable genres, using empty genre list");
    }
    parsed
}

fn parse_cast(raw: Option<&str>, title: &str) -> Option<Vec<String>> {
    let parsed = raw.and_then(literal::parse_string_list);
    if parsed.is_none() && raw.is_some() {
        debug!(title, "unparseable cast list, using empty cast");
    }
    parsed
}

/// The cleaned, ordinal-indexed set of recommendable items.
///
/// Row order is fixed at construction; the ordinal of an item is its
/// position here and addresses its row in the similarity model.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    /// Keep records whose type equals `movie_type` exactly, re-index densely
    /// from 0 and clean each one.
    pub fn from_records<I>(records: I, movie_type: &str) -> Self
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let items = records
            .into_iter()
            .filter(|r| r.kind.as_deref() == Some(movie_type))
            .map(|r| CatalogItem::from_record(&r))
            .collect();
        Self { items }
    }

    /// Read a catalog from CSV. Invalid UTF-8 inside a field is replaced,
    /// records that still cannot be decoded are skipped with a warning, and
    /// I/O failures abort.
    pub fn from_reader<R: Read>(reader: R, movie_type: &str) -> CatalogResult<Self> {
        let (records, skipped) = read_rows::<RawRecord, _>(reader, "catalog")?;
        let total = records.len();
        let catalog = Self::from_records(records, movie_type);
        info!(
            rows = total,
            skipped,
            items = catalog.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn load(path: &Path, movie_type: &str) -> CatalogResult<Self> {
        let file = std::fs::File::open(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(std::io::BufReader::new(file), movie_type)
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn get(&self, ordinal: usize) -> Option<&CatalogItem> {
        self.items.get(ordinal)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Ordinal of the first item whose title equals `title` exactly.
    pub fn position_of(&self, title: &str) -> Option<usize> {
        self.items.iter().position(|item| item.title == title)
    }

    /// Distinct titles in first-seen order.
    pub fn distinct_titles(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.items
            .iter()
            .map(|item| item.title.as_str())
            .filter(|t| seen.insert(*t))
            .collect()
    }
}

/// Decode every CSV row of `reader` into `T`. Returns the rows and the
/// number skipped.
pub(crate) fn read_rows<T, R>(reader: R, table: &'static str) -> CatalogResult<(Vec<T>, usize)>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = lossy_record(rdr.byte_headers()?);
    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for (line, result) in rdr.byte_records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(CatalogError::Csv(e)),
            Err(e) => {
                skipped += 1;
                warn!(table, record = line + 1, error = %e, "skipping unreadable record");
                continue;
            }
        };
        match lossy_record(&record).deserialize::<T>(Some(&headers)) {
            Ok(row) => rows.push(row),
            Err(e) => {
                skipped += 1;
                warn!(table, record = line + 1, error = %e, "skipping undecodable record");
            }
        }
    }
    Ok((rows, skipped))
}

/// Decode each field separately, replacing invalid UTF-8 with U+FFFD.
fn lossy_record(record: &ByteRecord) -> StringRecord {
    let fields: Vec<String> = record
        .iter()
        .map(|field| String::from_utf8_lossy(field).into_owned())
        .collect();
    StringRecord::from(fields)
}

/// Load the movie catalog from a CSV file.
pub fn load_catalog(path: &Path, movie_type: &str) -> CatalogResult<Catalog> {
    Catalog::load(path, movie_type)
}
