//! Acceleration units.
//!
//! The base unit is [`AccelerationUnit::MeterPerSecondSquared`]. Standard gravity is the
//! conventional `9.80665 m/s²`; knot-based units use the international knot (`1852 m/h`).

use metrum_derive::Unit;

/// Metres per second of one international knot.
const KNOT: f64 = 1852.0 / 3600.0;

/// Standard acceleration of gravity, in m/s².
const STANDARD_GRAVITY: f64 = 9.806_65;

/// Dimension tag for acceleration.
pub enum Acceleration {}

/// Units of [`Acceleration`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Unit)]
#[quantity(dimension = Acceleration, name = "Acceleration", base = MeterPerSecondSquared)]
pub enum AccelerationUnit {
    /// Metre per second squared (base unit).
    #[unit(plural = "MetersPerSecondSquared", abbreviations = ["m/s²"])]
    MeterPerSecondSquared,
    /// Kilometre per second squared.
    #[unit(plural = "KilometersPerSecondSquared", factor = 1e3, abbreviations = ["km/s²"])]
    KilometerPerSecondSquared,
    /// Decimetre per second squared.
    #[unit(plural = "DecimetersPerSecondSquared", factor = 1e-1, abbreviations = ["dm/s²"])]
    DecimeterPerSecondSquared,
    /// Centimetre per second squared.
    #[unit(plural = "CentimetersPerSecondSquared", factor = 1e-2, abbreviations = ["cm/s²"])]
    CentimeterPerSecondSquared,
    /// Millimetre per second squared.
    #[unit(plural = "MillimetersPerSecondSquared", factor = 1e-3, abbreviations = ["mm/s²"])]
    MillimeterPerSecondSquared,
    /// Micrometre per second squared.
    #[unit(plural = "MicrometersPerSecondSquared", factor = 1e-6, abbreviations = ["µm/s²"])]
    MicrometerPerSecondSquared,
    /// Nanometre per second squared.
    #[unit(plural = "NanometersPerSecondSquared", factor = 1e-9, abbreviations = ["nm/s²"])]
    NanometerPerSecondSquared,
    /// Foot per second squared.
    #[unit(plural = "FeetPerSecondSquared", factor = 0.3048, abbreviations = ["ft/s²"])]
    FootPerSecondSquared,
    /// Inch per second squared.
    #[unit(plural = "InchesPerSecondSquared", factor = 0.0254, abbreviations = ["in/s²"])]
    InchPerSecondSquared,
    /// Knot gained per hour.
    #[unit(plural = "KnotsPerHour", factor = KNOT / 3600.0, abbreviations = ["kn/h"])]
    KnotPerHour,
    /// Knot gained per minute.
    #[unit(plural = "KnotsPerMinute", factor = KNOT / 60.0, abbreviations = ["kn/min"])]
    KnotPerMinute,
    /// Knot gained per second.
    #[unit(plural = "KnotsPerSecond", factor = KNOT, abbreviations = ["kn/s"])]
    KnotPerSecond,
    /// Standard gravity, `g₀`.
    #[unit(plural = "StandardGravity", factor = STANDARD_GRAVITY, abbreviations = ["g"])]
    StandardGravity,
    /// One thousandth of standard gravity.
    #[unit(
        plural = "MillistandardGravity",
        factor = STANDARD_GRAVITY * 1e-3,
        abbreviations = ["mg"]
    )]
    MillistandardGravity,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Quantity, Unit};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    type Accel = Quantity<Acceleration>;

    #[test]
    fn standard_gravity() {
        let g = Accel::from_standard_gravity(1.0);
        assert_eq!(g.meters_per_second_squared(), 9.80665);
        assert_relative_eq!(g.millistandard_gravity(), 1000.0, max_relative = 1e-12);
        assert_relative_eq!(g.feet_per_second_squared(), 32.174_048_556_430_45, max_relative = 1e-12);
    }

    #[test]
    fn knots() {
        let a = Accel::from_knots_per_second(1.0);
        assert_relative_eq!(a.meters_per_second_squared(), 0.514_444_444_444_444_4, max_relative = 1e-12);
        assert_relative_eq!(a.knots_per_minute(), 60.0, max_relative = 1e-12);
        assert_relative_eq!(a.knots_per_hour(), 3600.0, max_relative = 1e-12);
    }

    #[test]
    fn metric_ladder() {
        let a = Accel::from_meters_per_second_squared(1.0);
        assert_relative_eq!(a.centimeters_per_second_squared(), 100.0, max_relative = 1e-12);
        assert_relative_eq!(a.millimeters_per_second_squared(), 1000.0, max_relative = 1e-12);
        assert_relative_eq!(a.kilometers_per_second_squared(), 1e-3, max_relative = 1e-12);
        assert_relative_eq!(a.inches_per_second_squared(), 39.370_078_740_157_48, max_relative = 1e-12);
    }

    #[test]
    fn arithmetic_in_base_unit() {
        let v = Accel::from_meters_per_second_squared(1.0);
        assert_eq!((-v).meters_per_second_squared(), -1.0);
        assert_eq!((Accel::from_meters_per_second_squared(3.0) - v).meters_per_second_squared(), 2.0);
        assert_eq!((v + v).meters_per_second_squared(), 2.0);
        assert_eq!((v * 10.0).meters_per_second_squared(), 10.0);
        assert_eq!((10.0 * v).meters_per_second_squared(), 10.0);
        assert_eq!((Accel::from_meters_per_second_squared(10.0) / 5.0).meters_per_second_squared(), 2.0);
        assert_eq!(
            Accel::from_meters_per_second_squared(10.0) / Accel::from_meters_per_second_squared(5.0),
            2.0
        );
    }

    proptest! {
        #[test]
        fn prop_every_unit_roundtrips(x in -1e9..1e9f64) {
            for &unit in AccelerationUnit::ALL {
                let back = Accel::from_unit(x, unit).unwrap().as_unit(unit).unwrap();
                prop_assert!((back - x).abs() <= 1e-5 * x.abs().max(1e-9), "{}: {} != {}", unit, back, x);
            }
        }
    }
}
