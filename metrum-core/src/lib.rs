//! Core type system for strongly typed, locale-aware physical quantities.
//!
//! `metrum-core` provides:
//!
//! - A *dimension* is an uninhabited marker type implementing [`Dimension`].
//! - A *unit* is a value of the dimension's unit enum, implementing [`Unit`].
//! - A value of a dimension is a [`Quantity<D>`], backed by an `f64` in the dimension's base unit.
//! - Conversion goes through the dimension's [`ConversionTable`], either typed
//!   (`from_kilometers`, `as_unit`) or by name ([`registry`]).
//! - Rendering goes through a [`Formatter`], which rounds, applies locale separators and resolves
//!   abbreviations through the [`AbbreviationCache`].
//!
//! Most users should depend on `metrum` (the facade crate).
//!
//! # What this crate solves
//!
//! - Compile-time separation of dimensions (length vs angle vs acceleration, …).
//! - Runtime-checked conversion between units of one dimension, including affine scales.
//! - Localized abbreviations with a concurrent, populate-once cache.
//!
//! # What this crate does not try to solve
//!
//! - Dimensional analysis: dividing a length by a time does not produce a speed.
//! - Parsing quantity strings such as `"5 rpm"`.
//! - Exact arithmetic (`Quantity` is `f64`).
//!
//! # Quick start
//!
//! ```rust
//! use metrum_core::{Locale, Quantity};
//! use metrum_core::rotational_speed::{RotationalSpeed, RotationalSpeedUnit};
//!
//! let spindle = Quantity::<RotationalSpeed>::from_revolutions_per_minute(1500.0);
//! assert!((spindle.radians_per_second() - 157.079_632_679_489_66).abs() < 1e-9);
//!
//! let text = spindle
//!     .to_string_in(RotationalSpeedUnit::RevolutionPerMinute, Some(&Locale::new("ru-RU")), Some(0))
//!     .unwrap();
//! assert_eq!(text, "1\u{a0}500 об/мин");
//! ```
//!
//! # Errors
//!
//! Typed construction and accessors never fail. Operations keyed by something the compiler cannot
//! check (unit names, a hand-written partial [`ConversionTable`], a locale without abbreviation
//! data, a dynamically typed comparison operand) return the error types in [`error`]. NaN and
//! infinities propagate per IEEE-754 and are never errors.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

// ─────────────────────────────────────────────────────────────────────────────
// Core modules
// ─────────────────────────────────────────────────────────────────────────────

mod abbreviation;
mod config;
mod conversion;
mod dimension;
pub mod error;
mod format;
mod locale;
mod quantity;
mod unit;

// ─────────────────────────────────────────────────────────────────────────────
// Public re-exports of core types
// ─────────────────────────────────────────────────────────────────────────────

pub use abbreviation::{AbbreviationCache, AbbreviationSource, JsonAbbreviations, NoAbbreviations};
pub use config::{FormatConfig, DEFAULT_SIGNIFICANT_DIGITS_AFTER_RADIX, DEFAULT_TEMPLATE};
pub use conversion::{ConversionEntry, ConversionTable};
pub use dimension::{Dimension, QuantityInfo};
pub use error::{
    ConfigError, Error, FormatError, InvalidComparisonError, MissingAbbreviationError,
    RegistryError, Result, UnsupportedUnitError,
};
pub use format::{round_to_radix, Formatter};
pub use locale::{Locale, NumberFormat, INVARIANT_TAG};
pub use quantity::{serde_with_unit, ComparisonType, Quantity};
pub use unit::Unit;

// ─────────────────────────────────────────────────────────────────────────────
// Predefined dimensions
// ─────────────────────────────────────────────────────────────────────────────

/// Predefined dimensions.
///
/// These are defined in `metrum-core` because `#[derive(Unit)]` implements inherent methods on
/// [`Quantity`], which is only possible inside the crate that defines it.
pub mod units;

pub use units::acceleration;
pub use units::angle;
pub use units::length;
pub use units::rotational_speed;
pub use units::temperature;

pub mod registry;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acceleration::{Acceleration, AccelerationUnit};
    use crate::rotational_speed::{RotationalSpeed, RotationalSpeedUnit};

    // ─────────────────────────────────────────────────────────────────────────────
    // Hand-written dimension with a partial conversion table
    // ─────────────────────────────────────────────────────────────────────────────

    enum Frequency {}

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum FrequencyUnit {
        Hertz,
        Kilohertz,
        Unregistered,
    }

    impl Unit for FrequencyUnit {
        const ALL: &'static [Self] = &[Self::Hertz, Self::Kilohertz, Self::Unregistered];

        fn name(self) -> &'static str {
            match self {
                Self::Hertz => "Hertz",
                Self::Kilohertz => "Kilohertz",
                Self::Unregistered => "Unregistered",
            }
        }

        fn plural_name(self) -> &'static str {
            self.name()
        }

        fn abbreviations(self) -> &'static [&'static str] {
            match self {
                Self::Hertz => &["Hz"],
                Self::Kilohertz => &["kHz"],
                Self::Unregistered => &[],
            }
        }
    }

    impl Dimension for Frequency {
        type Unit = FrequencyUnit;
        const NAME: &'static str = "Frequency";
        const BASE_UNIT: FrequencyUnit = FrequencyUnit::Hertz;

        fn conversion_table() -> &'static ConversionTable<FrequencyUnit> {
            static TABLE: once_cell::sync::Lazy<ConversionTable<FrequencyUnit>> =
                once_cell::sync::Lazy::new(|| {
                    ConversionTable::new(
                        "Frequency",
                        FrequencyUnit::Hertz,
                        vec![ConversionEntry::new(
                            FrequencyUnit::Kilohertz,
                            |x| x * 1e3,
                            |x| x / 1e3,
                        )],
                    )
                });
            &TABLE
        }
    }

    type Freq = Quantity<Frequency>;

    #[test]
    fn hand_written_dimension_converts_registered_units() {
        let f = Freq::from_unit(2.0, FrequencyUnit::Kilohertz).unwrap();
        assert_eq!(f.value(), 2000.0);
        assert_eq!(f.as_unit(FrequencyUnit::Kilohertz).unwrap(), 2.0);
    }

    #[test]
    fn unregistered_unit_never_falls_back_to_base() {
        assert_eq!(
            Freq::from_unit(1.0, FrequencyUnit::Unregistered).unwrap_err(),
            UnsupportedUnitError::new("Unregistered", "Frequency")
        );
        let f = Freq::from_base_value(1.0);
        assert!(f.as_unit(FrequencyUnit::Unregistered).is_err());
        assert!(matches!(
            f.to_string_in(FrequencyUnit::Unregistered, None, None),
            Err(FormatError::UnsupportedUnit(_))
        ));
    }

    #[test]
    fn missing_abbreviation_is_reported() {
        let cache = AbbreviationCache::new(NoAbbreviations);
        let err = cache
            .abbreviation::<Frequency>(FrequencyUnit::Unregistered, &Locale::new("fr-FR"))
            .unwrap_err();
        assert_eq!(err.unit, "Unregistered");
        assert_eq!(err.locale, "fr-FR");
        assert_eq!(
            cache
                .abbreviation::<Frequency>(FrequencyUnit::Kilohertz, &Locale::new("fr-FR"))
                .unwrap(),
            "kHz"
        );
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Global formatting defaults
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn display_uses_base_unit_and_two_digits() {
        let a = Quantity::<Acceleration>::from_meters_per_second_squared(9.80665);
        assert_eq!(a.to_string(), "9.81 m/s²");
        assert_eq!(format!("{:.4}", a), "9.8067 m/s²");
    }

    #[test]
    fn small_magnitudes_need_more_digits() {
        let d = Quantity::<crate::length::Length>::from_meters(1e-20);
        assert_eq!(d.to_string(), "0 m");
        assert_eq!(format!("{:.22}", d), "0.00000000000000000001 m");
    }

    #[test]
    fn to_string_in_other_unit() {
        let a = Quantity::<Acceleration>::from_standard_gravity(1.0);
        assert_eq!(
            a.to_string_in(AccelerationUnit::StandardGravity, Some(&Locale::invariant()), None)
                .unwrap(),
            "1 g"
        );
    }

    #[test]
    fn abbreviation_uses_builtin_translations() {
        let abbr = Quantity::<RotationalSpeed>::abbreviation(
            RotationalSpeedUnit::RevolutionPerMinute,
            Some(&Locale::new("ru-RU")),
        )
        .unwrap();
        assert_eq!(abbr, "об/мин");
    }

    #[test]
    fn to_string_with_extra_arguments() {
        let speed = Quantity::<RotationalSpeed>::from_revolutions_per_minute(33.333);
        let rendered = speed
            .to_string_with(
                RotationalSpeedUnit::RevolutionPerMinute,
                Some(&Locale::invariant()),
                "{0} {1} ({2})",
                &[&"turntable"],
            )
            .unwrap();
        assert_eq!(rendered, "33.33 rpm (turntable)");
    }
}
