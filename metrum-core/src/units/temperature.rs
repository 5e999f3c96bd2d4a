//! Temperature units.
//!
//! Temperature scales are affine, so every non-base unit declares explicit `to_base` and
//! `from_base` functions rather than a factor. The base unit is [`TemperatureUnit::Kelvin`].
//!
//! Arithmetic on temperatures works on absolute kelvin values: `20 °C + 20 °C` is `313.15 °C`,
//! not `40 °C`.

use metrum_derive::Unit;

const CELSIUS_OFFSET: f64 = 273.15;
const FAHRENHEIT_OFFSET: f64 = 459.67;

/// Dimension tag for thermodynamic temperature.
pub enum Temperature {}

/// Units of [`Temperature`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Unit)]
#[quantity(dimension = Temperature, name = "Temperature", base = Kelvin)]
pub enum TemperatureUnit {
    /// Kelvin (base unit).
    #[unit(abbreviations = ["K"])]
    Kelvin,
    /// Degree Celsius.
    #[unit(
        plural = "DegreesCelsius",
        to_base = |x| x + CELSIUS_OFFSET,
        from_base = |x| x - CELSIUS_OFFSET,
        abbreviations = ["°C"]
    )]
    DegreeCelsius,
    /// Degree Fahrenheit.
    #[unit(
        plural = "DegreesFahrenheit",
        to_base = |x| (x + FAHRENHEIT_OFFSET) * 5.0 / 9.0,
        from_base = |x| x * 9.0 / 5.0 - FAHRENHEIT_OFFSET,
        abbreviations = ["°F"]
    )]
    DegreeFahrenheit,
    /// Degree Rankine.
    #[unit(plural = "DegreesRankine", factor = 5.0 / 9.0, abbreviations = ["°R"])]
    DegreeRankine,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Quantity;
    use approx::assert_relative_eq;

    type Temp = Quantity<Temperature>;

    #[test]
    fn fixed_points() {
        let boiling = Temp::from_degrees_celsius(100.0);
        assert_relative_eq!(boiling.kelvins(), 373.15, max_relative = 1e-12);
        assert_relative_eq!(boiling.degrees_fahrenheit(), 212.0, max_relative = 1e-12);
        assert_relative_eq!(boiling.degrees_rankine(), 671.67, max_relative = 1e-12);

        let absolute_zero = Temp::from_degrees_fahrenheit(-459.67);
        assert_relative_eq!(absolute_zero.kelvins(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn minus_forty_is_shared() {
        let t = Temp::from_degrees_celsius(-40.0);
        assert_relative_eq!(t.degrees_fahrenheit(), -40.0, max_relative = 1e-12);
    }

    #[test]
    fn ordering_across_units() {
        assert!(Temp::from_degrees_celsius(0.0) > Temp::from_degrees_fahrenheit(0.0));
        assert!(Temp::from_kelvins(0.0) < Temp::from_degrees_celsius(-273.0));
    }
}
