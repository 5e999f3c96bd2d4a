//! Rotational speed units.
//!
//! The base unit is [`RotationalSpeedUnit::RadianPerSecond`]. Revolution-based units are declared
//! with explicit conversion functions instead of a single factor so that `1 r/s` reads back as
//! exactly `60 rpm`.
//!
//! ```rust
//! use metrum_core::Quantity;
//! use metrum_core::rotational_speed::RotationalSpeed;
//!
//! let spindle = Quantity::<RotationalSpeed>::from_revolutions_per_second(1.0);
//! assert_eq!(spindle.revolutions_per_minute(), 60.0);
//! ```

use core::f64::consts::PI;
use metrum_derive::Unit;

/// Dimension tag for rotational speed.
pub enum RotationalSpeed {}

/// Units of [`RotationalSpeed`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Unit)]
#[quantity(dimension = RotationalSpeed, name = "RotationalSpeed", base = RadianPerSecond)]
pub enum RotationalSpeedUnit {
    // ─────────────────────────────────────────────────────────────────────────
    // Radian ladder
    // ─────────────────────────────────────────────────────────────────────────
    /// Radian per second (base unit).
    #[unit(plural = "RadiansPerSecond", abbreviations = ["rad/s"])]
    RadianPerSecond,
    /// Centiradian per second.
    #[unit(plural = "CentiradiansPerSecond", factor = 1e-2, abbreviations = ["crad/s"])]
    CentiradianPerSecond,
    /// Deciradian per second.
    #[unit(plural = "DeciradiansPerSecond", factor = 1e-1, abbreviations = ["drad/s"])]
    DeciradianPerSecond,
    /// Milliradian per second.
    #[unit(plural = "MilliradiansPerSecond", factor = 1e-3, abbreviations = ["mrad/s"])]
    MilliradianPerSecond,
    /// Microradian per second.
    #[unit(plural = "MicroradiansPerSecond", factor = 1e-6, abbreviations = ["µrad/s"])]
    MicroradianPerSecond,
    /// Nanoradian per second.
    #[unit(plural = "NanoradiansPerSecond", factor = 1e-9, abbreviations = ["nrad/s"])]
    NanoradianPerSecond,

    // ─────────────────────────────────────────────────────────────────────────
    // Degree ladder
    // ─────────────────────────────────────────────────────────────────────────
    /// Degree per second.
    #[unit(plural = "DegreesPerSecond", factor = PI / 180.0, abbreviations = ["°/s", "deg/s"])]
    DegreePerSecond,
    /// Degree per minute.
    #[unit(
        plural = "DegreesPerMinute",
        factor = PI / 180.0 / 60.0,
        abbreviations = ["°/min", "deg/min"]
    )]
    DegreePerMinute,
    /// Millidegree per second.
    #[unit(plural = "MillidegreesPerSecond", factor = PI / 180.0 * 1e-3, abbreviations = ["m°/s"])]
    MillidegreePerSecond,
    /// Microdegree per second.
    #[unit(plural = "MicrodegreesPerSecond", factor = PI / 180.0 * 1e-6, abbreviations = ["µ°/s"])]
    MicrodegreePerSecond,
    /// Nanodegree per second.
    #[unit(plural = "NanodegreesPerSecond", factor = PI / 180.0 * 1e-9, abbreviations = ["n°/s"])]
    NanodegreePerSecond,

    // ─────────────────────────────────────────────────────────────────────────
    // Revolutions
    // ─────────────────────────────────────────────────────────────────────────
    /// Revolution per second.
    #[unit(
        plural = "RevolutionsPerSecond",
        to_base = |x| x * (2.0 * PI),
        from_base = |x| x / (2.0 * PI),
        abbreviations = ["r/s"]
    )]
    RevolutionPerSecond,
    /// Revolution per minute.
    #[unit(
        plural = "RevolutionsPerMinute",
        to_base = |x| x * (2.0 * PI) / 60.0,
        from_base = |x| x / (2.0 * PI) * 60.0,
        abbreviations = ["rpm", "r/min"]
    )]
    RevolutionPerMinute,
}
