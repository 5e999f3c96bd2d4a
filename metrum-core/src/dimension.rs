//! Dimension trait and dimension metadata.

use crate::conversion::ConversionTable;
use crate::unit::Unit;

/// Marker trait for **dimensions** (Length, RotationalSpeed, …).
///
/// A dimension is a compile-time identity, never a value. You usually model each dimension as an
/// empty enum and let `#[derive(Unit)]` on its unit enum implement this trait:
///
/// ```rust
/// use metrum_core::{Dimension, Quantity};
/// use metrum_core::length::{Length, LengthUnit};
///
/// assert_eq!(Length::NAME, "Length");
/// assert_eq!(Length::BASE_UNIT, LengthUnit::Meter);
/// let _ = Quantity::<Length>::zero();
/// ```
pub trait Dimension: 'static {
    /// The unit enum of this dimension.
    type Unit: Unit;

    /// Dimension name, e.g. `"RotationalSpeed"`.
    const NAME: &'static str;

    /// The unit every quantity of this dimension is stored in.
    const BASE_UNIT: Self::Unit;

    /// Conversion table between [`Self::Unit`] values and the base unit.
    fn conversion_table() -> &'static ConversionTable<Self::Unit>;

    /// Static description of this dimension.
    fn info() -> QuantityInfo<Self::Unit> {
        QuantityInfo {
            name: Self::NAME,
            base_unit: Self::BASE_UNIT,
            units: <Self::Unit as Unit>::ALL,
        }
    }
}

/// Name, base unit and unit list of a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityInfo<U: 'static> {
    /// Dimension name.
    pub name: &'static str,
    /// Storage unit.
    pub base_unit: U,
    /// Every unit of the dimension.
    pub units: &'static [U],
}

impl<U: Unit> QuantityInfo<U> {
    /// Singular names of every unit, in declaration order.
    pub fn unit_names(&self) -> Vec<&'static str> {
        self.units.iter().map(|unit| unit.name()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotational_speed::{RotationalSpeed, RotationalSpeedUnit};

    #[test]
    fn info_reports_base_unit_and_all_units() {
        let info = RotationalSpeed::info();
        assert_eq!(info.name, "RotationalSpeed");
        assert_eq!(info.base_unit, RotationalSpeedUnit::RadianPerSecond);
        assert_eq!(info.units.len(), RotationalSpeedUnit::ALL.len());
        assert!(info.unit_names().contains(&"RevolutionPerMinute"));
    }
}
