//! Locale identifiers and their number formats.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Tag of the invariant locale, the fallback for every abbreviation lookup.
pub const INVARIANT_TAG: &str = "en-US";

/// A culture identifier such as `"en-US"` or `"ru-RU"`.
///
/// The core treats a locale as an opaque cache key and as the selector of a [`NumberFormat`]. Tags are
/// compared exactly; the language subtag is used only as a second-chance lookup by data sources.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Creates a locale from a tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// The invariant locale (`en-US`).
    pub fn invariant() -> Self {
        Self(INVARIANT_TAG.to_string())
    }

    /// The full tag.
    pub fn tag(&self) -> &str {
        &self.0
    }

    /// Language subtag: `"nb"` for `"nb-NO"`.
    pub fn language(&self) -> &str {
        self.0.split(['-', '_']).next().unwrap_or_default()
    }

    /// Whether this is the invariant locale.
    pub fn is_invariant(&self) -> bool {
        self.0 == INVARIANT_TAG
    }

    /// Decimal and group separators conventionally used with this locale.
    pub fn number_format(&self) -> NumberFormat {
        match self.language() {
            "de" | "nl" | "es" | "it" | "pt" | "da" | "tr" | "id" => NumberFormat::new(",", "."),
            "ru" | "nb" | "nn" | "no" | "fr" | "sv" | "fi" | "pl" | "cs" | "sk" | "uk" => {
                NumberFormat::new(",", "\u{a0}")
            }
            _ => NumberFormat::default(),
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::invariant()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Separators used to render a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    /// Separator between integer and fractional digits.
    pub decimal_separator: String,
    /// Separator between groups of three integer digits. Empty disables grouping.
    #[serde(default)]
    pub group_separator: String,
}

impl NumberFormat {
    /// Creates a number format.
    pub fn new(decimal_separator: impl Into<String>, group_separator: impl Into<String>) -> Self {
        Self {
            decimal_separator: decimal_separator.into(),
            group_separator: group_separator.into(),
        }
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::new(".", ",")
    }
}
