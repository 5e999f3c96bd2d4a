//! Error types.
//!
//! Every error here is local and deterministic: it reports a misuse (a unit that is not
//! registered, a missing abbreviation, a comparison against the wrong type) rather than a
//! transient condition, so none of them is ever retried internally.

use thiserror::Error;

/// Result alias using the umbrella [`enum@Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// A unit that is not registered in a dimension's conversion table was used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unit `{unit}` is not supported by dimension `{dimension}`")]
pub struct UnsupportedUnitError {
    /// Name of the offending unit.
    pub unit: String,
    /// Dimension whose table was consulted.
    pub dimension: &'static str,
}

impl UnsupportedUnitError {
    /// Creates a new error for `unit` in `dimension`.
    pub fn new(unit: impl Into<String>, dimension: &'static str) -> Self {
        Self {
            unit: unit.into(),
            dimension,
        }
    }
}

/// No abbreviation exists for a unit, even after falling back to the invariant locale.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no abbreviation for unit `{unit}` of `{dimension}` in locale `{locale}` or the invariant locale")]
pub struct MissingAbbreviationError {
    /// Dimension name.
    pub dimension: &'static str,
    /// Unit name.
    pub unit: &'static str,
    /// Locale that was requested.
    pub locale: String,
}

/// Failure of a dynamically typed comparison.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidComparisonError {
    /// The other operand was absent.
    #[error("cannot compare {dimension} quantity with null")]
    Null {
        /// Dimension of the left-hand operand.
        dimension: &'static str,
    },

    /// The other operand is not a quantity of the same dimension.
    #[error("cannot compare {expected} quantity with a value of another type")]
    TypeMismatch {
        /// Dimension the other operand was expected to have.
        expected: &'static str,
    },
}

/// Error raised while rendering a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The target unit is not registered.
    #[error(transparent)]
    UnsupportedUnit(#[from] UnsupportedUnitError),

    /// The abbreviation could not be resolved.
    #[error(transparent)]
    MissingAbbreviation(#[from] MissingAbbreviationError),

    /// The format template is malformed or references an argument that was not supplied.
    #[error("invalid format template `{template}`: {reason}")]
    InvalidTemplate {
        /// The template as given.
        template: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Error raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for [`crate::FormatConfig`].
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// No configuration file was found in the searched locations.
    #[error("no metrum.toml found in standard locations")]
    NotFound,

    /// A process-wide configuration was already installed.
    #[error("a global format configuration is already installed")]
    AlreadyInstalled,
}

/// Error raised by the type-erased [`crate::registry::QuantityRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The dimension name is not registered.
    #[error("unknown dimension `{0}`")]
    UnknownDimension(String),

    /// One of the unit names does not belong to the dimension.
    #[error(transparent)]
    UnsupportedUnit(#[from] UnsupportedUnitError),
}

/// Umbrella error for callers that do not care which stage failed.
#[derive(Debug, Error)]
pub enum Error {
    /// See [`UnsupportedUnitError`].
    #[error(transparent)]
    UnsupportedUnit(#[from] UnsupportedUnitError),

    /// See [`MissingAbbreviationError`].
    #[error(transparent)]
    MissingAbbreviation(#[from] MissingAbbreviationError),

    /// See [`InvalidComparisonError`].
    #[error(transparent)]
    InvalidComparison(#[from] InvalidComparisonError),

    /// See [`FormatError`].
    #[error(transparent)]
    Format(#[from] FormatError),

    /// See [`ConfigError`].
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// See [`RegistryError`].
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// An abbreviation data document could not be parsed.
    #[error("invalid abbreviation data: {0}")]
    AbbreviationData(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_unit_message_names_unit_and_dimension() {
        let err = UnsupportedUnitError::new("Meter", "RotationalSpeed");
        assert_eq!(
            err.to_string(),
            "unit `Meter` is not supported by dimension `RotationalSpeed`"
        );
    }

    #[test]
    fn format_error_is_transparent_over_unit_error() {
        let err: FormatError = UnsupportedUnitError::new("Foo", "Length").into();
        assert_eq!(err.to_string(), "unit `Foo` is not supported by dimension `Length`");
    }

    #[test]
    fn umbrella_error_wraps_comparison_error() {
        let err: Error = InvalidComparisonError::Null { dimension: "Angle" }.into();
        assert!(matches!(err, Error::InvalidComparison(_)));
        assert_eq!(err.to_string(), "cannot compare Angle quantity with null");
    }
}
