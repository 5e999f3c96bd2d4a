//! Length units.
//!
//! The base unit is [`LengthUnit::Meter`]. Imperial units follow the international definitions
//! (the inch is exactly `0.0254 m`).

use metrum_derive::Unit;

/// Dimension tag for length.
pub enum Length {}

/// Units of [`Length`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Unit)]
#[quantity(dimension = Length, name = "Length", base = Meter)]
pub enum LengthUnit {
    /// Metre (base unit).
    #[unit(abbreviations = ["m"])]
    Meter,
    /// Kilometre.
    #[unit(factor = 1e3, abbreviations = ["km"])]
    Kilometer,
    /// Centimetre.
    #[unit(factor = 1e-2, abbreviations = ["cm"])]
    Centimeter,
    /// Millimetre.
    #[unit(factor = 1e-3, abbreviations = ["mm"])]
    Millimeter,
    /// Micrometre.
    #[unit(factor = 1e-6, abbreviations = ["µm"])]
    Micrometer,
    /// International inch.
    #[unit(plural = "Inches", factor = 0.0254, abbreviations = ["in", "\""])]
    Inch,
    /// International foot.
    #[unit(plural = "Feet", factor = 0.3048, abbreviations = ["ft", "'"])]
    Foot,
    /// International yard.
    #[unit(factor = 0.9144, abbreviations = ["yd"])]
    Yard,
    /// Statute mile.
    #[unit(factor = 1609.344, abbreviations = ["mi"])]
    Mile,
    /// International nautical mile.
    #[unit(factor = 1852.0, abbreviations = ["NM", "nmi"])]
    NauticalMile,
}
