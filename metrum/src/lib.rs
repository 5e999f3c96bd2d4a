//! Strongly typed physical quantities with localized formatting.
//!
//! `metrum` is the user-facing crate in this workspace. It re-exports the full API from
//! `metrum-core`, including the shipped dimensions (acceleration, angle, length, rotational speed,
//! temperature).
//!
//! The core idea is: a value is always a `Quantity<D>`, where `D` is an uninhabited type naming the
//! dimension. The magnitude is stored in `D`'s base unit; units only matter when a value enters
//! or leaves the type.
//!
//! # Quick start
//!
//! ```rust
//! use metrum::prelude::*;
//!
//! let a = Acceleration::from_meters_per_second_squared(1.5);
//! let b = Acceleration::from_centimeters_per_second_squared(250.0);
//! assert_eq!((a + b).meters_per_second_squared(), 4.0);
//!
//! let speed = RotationalSpeed::from_revolutions_per_second(1.0);
//! assert_eq!(speed.revolutions_per_minute(), 60.0);
//! assert_eq!(
//!     speed.to_string_in(RotationalSpeedUnit::RevolutionPerMinute, None, None).unwrap(),
//!     "60 rpm"
//! );
//! ```
//!
//! # Incorrect usage (type error)
//!
//! ```compile_fail
//! use metrum::prelude::*;
//!
//! let d = Length::from_meters(1.0);
//! let t = Temperature::from_kelvins(1.0);
//! let _ = d + t; // cannot add different dimensions
//! ```
//!
//! # Configuration
//!
//! Formatting defaults come from a [`FormatConfig`], loaded from `metrum.toml` or built in code
//! and installed once per process:
//!
//! ```rust,no_run
//! use metrum::FormatConfig;
//!
//! let config = FormatConfig::from_default_location().unwrap_or_default();
//! config.install().expect("format configuration installed twice");
//! ```
//!
//! # Logging
//!
//! The crate logs through the `log` facade (cache population at `debug`, cache hits at `trace`,
//! locale fallbacks at `warn`) and never installs a logger itself.
//!
//! # SemVer and stability
//!
//! This workspace is currently `0.x`. Expect breaking changes between minor versions until `1.0`.
#![forbid(unsafe_code)]

pub use metrum_core::*;

pub use metrum_core::units::acceleration;
pub use metrum_core::units::angle;
pub use metrum_core::units::length;
pub use metrum_core::units::rotational_speed;
pub use metrum_core::units::temperature;

pub use metrum_core::units::acceleration::AccelerationUnit;
pub use metrum_core::units::angle::AngleUnit;
pub use metrum_core::units::length::LengthUnit;
pub use metrum_core::units::rotational_speed::RotationalSpeedUnit;
pub use metrum_core::units::temperature::TemperatureUnit;

/// Quantity aliases and the items most programs need.
///
/// The aliases carry the dimension's name, so `Length::from_meters(1.0)` is a
/// `Quantity<length::Length>`.
pub mod prelude {
    pub use metrum_core::{
        ComparisonType, Dimension, FormatConfig, Locale, Quantity, Unit, UnsupportedUnitError,
    };

    pub use metrum_core::units::acceleration::AccelerationUnit;
    pub use metrum_core::units::angle::AngleUnit;
    pub use metrum_core::units::length::LengthUnit;
    pub use metrum_core::units::rotational_speed::RotationalSpeedUnit;
    pub use metrum_core::units::temperature::TemperatureUnit;

    /// An acceleration.
    pub type Acceleration = Quantity<metrum_core::units::acceleration::Acceleration>;
    /// A plane angle.
    pub type Angle = Quantity<metrum_core::units::angle::Angle>;
    /// A length.
    pub type Length = Quantity<metrum_core::units::length::Length>;
    /// A rotational speed.
    pub type RotationalSpeed = Quantity<metrum_core::units::rotational_speed::RotationalSpeed>;
    /// A thermodynamic temperature.
    pub type Temperature = Quantity<metrum_core::units::temperature::Temperature>;
}
