//! Localized abbreviation data sources.

use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;

use crate::locale::Locale;

/// Abbreviation document shipped with the crate.
const BUILTIN_DOCUMENT: &str = include_str!("../../resources/abbreviations.json");

/// Supplies localized abbreviations to the [`super::AbbreviationCache`].
///
/// `lookup` returns the abbreviations of one unit in one locale, preferred one first, or `None` when
/// the source has no translation for that locale. An empty list counts as no translation. The cache
/// handles fallback to the invariant locale.
pub trait AbbreviationSource: Send + Sync {
    /// Abbreviations of `unit` of `dimension` in `locale`.
    fn lookup(&self, dimension: &str, unit: &str, locale: &Locale) -> Option<Vec<String>>;
}

/// A source with no data; the cache then serves the abbreviations compiled into each unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAbbreviations;

impl AbbreviationSource for NoAbbreviations {
    fn lookup(&self, _dimension: &str, _unit: &str, _locale: &Locale) -> Option<Vec<String>> {
        None
    }
}

/// Abbreviations loaded from a JSON document shaped as
/// `{ "<dimension>": { "<unit>": { "<locale tag>": ["abbr", ...] } } }`.
///
/// A tag is matched exactly first, then by language subtag, so `"nb"` data serves `"nb-NO"`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct JsonAbbreviations {
    dimensions: HashMap<String, HashMap<String, HashMap<String, Vec<String>>>>,
}

impl JsonAbbreviations {
    /// Parses a document from a string.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parses a document from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_json::Error> {
        serde_json::from_reader(reader)
    }

    /// The document embedded in the crate.
    ///
    /// An unreadable embedded document is logged and treated as empty.
    pub fn builtin() -> Self {
        match Self::from_json_str(BUILTIN_DOCUMENT) {
            Ok(source) => source,
            Err(e) => {
                log::warn!("embedded abbreviation document is invalid: {}", e);
                Self::default()
            }
        }
    }

    /// Number of dimensions with data.
    pub fn dimension_count(&self) -> usize {
        self.dimensions.len()
    }
}

impl AbbreviationSource for JsonAbbreviations {
    fn lookup(&self, dimension: &str, unit: &str, locale: &Locale) -> Option<Vec<String>> {
        let by_locale = self.dimensions.get(dimension)?.get(unit)?;
        by_locale
            .get(locale.tag())
            .or_else(|| by_locale.get(locale.language()))
            .filter(|list| !list.is_empty())
            .cloned()
    }
}
