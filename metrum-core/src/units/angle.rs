//! Plane angle units.
//!
//! The base unit is [`AngleUnit::Radian`].

use core::f64::consts::PI;
use metrum_derive::Unit;

/// Dimension tag for plane angle.
pub enum Angle {}

/// Units of [`Angle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Unit)]
#[quantity(dimension = Angle, name = "Angle", base = Radian)]
pub enum AngleUnit {
    /// Radian (base unit).
    #[unit(abbreviations = ["rad"])]
    Radian,
    /// Milliradian.
    #[unit(factor = 1e-3, abbreviations = ["mrad"])]
    Milliradian,
    /// Degree, `π/180 rad`.
    #[unit(factor = PI / 180.0, abbreviations = ["°", "deg"])]
    Degree,
    /// Arcminute, `1/60 °`.
    #[unit(factor = PI / 180.0 / 60.0, abbreviations = ["′", "arcmin"])]
    Arcminute,
    /// Arcsecond, `1/3600 °`.
    #[unit(factor = PI / 180.0 / 3600.0, abbreviations = ["″", "arcsec"])]
    Arcsecond,
    /// Gradian, `π/200 rad`.
    #[unit(factor = PI / 200.0, abbreviations = ["g", "gon"])]
    Gradian,
    /// Full turn, `2π rad`.
    #[unit(factor = 2.0 * PI, abbreviations = ["r", "rev"])]
    Revolution,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Quantity, Unit};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    type Rotation = Quantity<Angle>;

    #[test]
    fn right_angle_in_every_unit() {
        let right = Rotation::from_degrees(90.0);
        assert_relative_eq!(right.radians(), PI / 2.0, max_relative = 1e-15);
        assert_relative_eq!(right.gradians(), 100.0, max_relative = 1e-12);
        assert_relative_eq!(right.revolutions(), 0.25, max_relative = 1e-12);
        assert_relative_eq!(right.arcminutes(), 5400.0, max_relative = 1e-12);
        assert_relative_eq!(right.arcseconds(), 324_000.0, max_relative = 1e-12);
    }

    proptest! {
        #[test]
        fn prop_degree_radian_roundtrip(deg in -1e6..1e6f64) {
            let back = Rotation::from_degrees(deg).degrees();
            prop_assert!((back - deg).abs() <= 1e-9 * deg.abs().max(1.0));
        }

        #[test]
        fn prop_every_unit_roundtrips(x in -1e9..1e9f64) {
            for &unit in AngleUnit::ALL {
                let back = Rotation::from_unit(x, unit).unwrap().as_unit(unit).unwrap();
                prop_assert!((back - x).abs() <= 1e-5 * x.abs().max(1e-9), "{}: {} != {}", unit, back, x);
            }
        }
    }
}
