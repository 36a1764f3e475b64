// crates/geoinsight-core/src/catalog.rs

//! In-process suggestion source.
//!
//! Mirrors the backend's `/countries/search` endpoint: a fixed list of
//! country names filtered by substring, at most [`MAX_SUGGESTIONS`] results,
//! in list order. Useful offline and in tests.

use crate::error::Result;
use crate::text::fold_key;
use crate::traits::SuggestionSource;
use async_trait::async_trait;
use once_cell::sync::Lazy;

pub const MAX_SUGGESTIONS: usize = 10;

/// The names the backend offers for autocomplete.
pub const DEFAULT_COUNTRIES: &[&str] = &[
    "Germany",
    "Japan",
    "Brazil",
    "Norway",
    "United States",
    "United Kingdom",
    "France",
    "China",
    "India",
    "Australia",
    "Canada",
    "Mexico",
    "Argentina",
    "South Korea",
    "Italy",
    "Spain",
    "Netherlands",
    "Sweden",
    "Denmark",
    "Switzerland",
];

static DEFAULT_CATALOG: Lazy<CountryCatalog> =
    Lazy::new(|| CountryCatalog::new(DEFAULT_COUNTRIES.iter().copied()));

/// A list of country names with their folded match keys.
#[derive(Debug, Clone)]
pub struct CountryCatalog {
    // (display name, folded key)
    entries: Vec<(String, String)>,
    limit: usize,
}

impl Default for CountryCatalog {
    fn default() -> Self {
        DEFAULT_CATALOG.clone()
    }
}

impl CountryCatalog {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = names
            .into_iter()
            .map(|n| {
                let name = n.into();
                let key = fold_key(&name);
                (name, key)
            })
            .collect();
        Self {
            entries,
            limit: MAX_SUGGESTIONS,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names containing `query`, ignoring case and accents.
    pub fn lookup(&self, query: &str) -> Vec<String> {
        let q = fold_key(query.trim());
        self.entries
            .iter()
            .filter(|(_, key)| key.contains(&q))
            .take(self.limit)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

#[async_trait]
impl SuggestionSource for CountryCatalog {
    async fn suggest(&self, query: &str) -> Result<Vec<String>> {
        Ok(self.lookup(query))
    }
}
