//! Formatting configuration.
//!
//! The locale and precision used when a caller does not pass them explicitly come from a
//! [`FormatConfig`], never from ambient thread state. A process-wide configuration can be
//! injected once with [`FormatConfig::install`]; until then the defaults apply.
//!
//! ```toml
//! default_locale = "nb-NO"
//! significant_digits_after_radix = 3
//! template = "{0} {1}"
//!
//! [number_formats.nb-NO]
//! decimal_separator = ","
//! group_separator = " "
//! ```

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::locale::{Locale, NumberFormat};

/// Digits after the radix used by `Display`.
pub const DEFAULT_SIGNIFICANT_DIGITS_AFTER_RADIX: u8 = 2;

/// Template used when no custom template is given: `{0}` is the value, `{1}` the abbreviation.
pub const DEFAULT_TEMPLATE: &str = "{0} {1}";

static GLOBAL: OnceCell<FormatConfig> = OnceCell::new();

/// Formatting defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Locale used when a call passes none.
    #[serde(default)]
    pub default_locale: Locale,

    /// Digits after the radix used when a call passes none.
    #[serde(default = "default_digits")]
    pub significant_digits_after_radix: u8,

    /// Template used by [`crate::Formatter::format`].
    #[serde(default = "default_template")]
    pub template: String,

    /// Per-locale overrides of [`Locale::number_format`], keyed by locale tag.
    #[serde(default)]
    pub number_formats: HashMap<String, NumberFormat>,
}

fn default_digits() -> u8 {
    DEFAULT_SIGNIFICANT_DIGITS_AFTER_RADIX
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::default(),
            significant_digits_after_radix: default_digits(),
            template: default_template(),
            number_formats: HashMap::new(),
        }
    }
}

impl FormatConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads a configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Loads `metrum.toml` from the current directory or its parent.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [PathBuf::from("metrum.toml"), PathBuf::from("../metrum.toml")];

        for path in search_paths {
            if path.exists() {
                log::debug!("loading format configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::NotFound)
    }

    /// Builder: set the default locale.
    pub fn with_default_locale(mut self, locale: impl Into<Locale>) -> Self {
        self.default_locale = locale.into();
        self
    }

    /// Builder: set the default digits after the radix.
    pub fn with_significant_digits_after_radix(mut self, digits: u8) -> Self {
        self.significant_digits_after_radix = digits;
        self
    }

    /// Builder: set the default template.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Builder: override the number format of one locale.
    pub fn with_number_format(mut self, locale: &Locale, format: NumberFormat) -> Self {
        self.number_formats.insert(locale.tag().to_string(), format);
        self
    }

    /// Number format for `locale`, honoring overrides.
    pub fn number_format(&self, locale: &Locale) -> NumberFormat {
        self.number_formats
            .get(locale.tag())
            .cloned()
            .unwrap_or_else(|| locale.number_format())
    }

    /// Installs `self` as the process-wide configuration.
    ///
    /// Fails if a configuration was already installed or [`FormatConfig::global`] was already
    /// read.
    pub fn install(self) -> Result<(), ConfigError> {
        GLOBAL.set(self).map_err(|_| ConfigError::AlreadyInstalled)
    }

    /// The process-wide configuration, defaults if none was installed.
    pub fn global() -> &'static FormatConfig {
        GLOBAL.get_or_init(FormatConfig::default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_yields_defaults() {
        let config = FormatConfig::from_toml_str("").unwrap();
        assert_eq!(config, FormatConfig::default());
        assert_eq!(config.significant_digits_after_radix, 2);
        assert_eq!(config.template, "{0} {1}");
        assert!(config.default_locale.is_invariant());
    }

    #[test]
    fn parses_all_fields() {
        let toml = r#"
            default_locale = "nb-NO"
            significant_digits_after_radix = 4
            template = "{1}: {0}"

            [number_formats.nb-NO]
            decimal_separator = ","
            group_separator = " "
        "#;

        let config = FormatConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.default_locale, Locale::new("nb-NO"));
        assert_eq!(config.significant_digits_after_radix, 4);
        assert_eq!(config.template, "{1}: {0}");
        assert_eq!(
            config.number_format(&Locale::new("nb-NO")),
            NumberFormat::new(",", " ")
        );
    }

    #[test]
    fn number_format_falls_back_to_locale_convention() {
        let config = FormatConfig::default();
        assert_eq!(config.number_format(&Locale::new("de-DE")), NumberFormat::new(",", "."));
    }

    #[test]
    fn rejects_invalid_document() {
        let err = FormatConfig::from_toml_str("significant_digits_after_radix = \"two\"");
        assert!(matches!(err, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_locale = \"ru-RU\"").unwrap();

        let config = FormatConfig::from_file(file.path()).unwrap();
        assert_eq!(config.default_locale, Locale::new("ru-RU"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = FormatConfig::from_file("/definitely/not/here/metrum.toml");
        assert!(matches!(err, Err(ConfigError::Io(_))));
    }

    #[test]
    fn builders_override_defaults() {
        let config = FormatConfig::default()
            .with_default_locale("de-DE")
            .with_significant_digits_after_radix(0)
            .with_template("{0}{1}");
        assert_eq!(config.default_locale, Locale::new("de-DE"));
        assert_eq!(config.significant_digits_after_radix, 0);
        assert_eq!(config.template, "{0}{1}");
    }
}
