//! Name-based conversion across all registered dimensions.
//!
//! The typed API (`Quantity<D>`) is the primary way to convert. The registry serves callers that
//! only have strings at hand, such as configuration files or wire formats:
//!
//! ```text
//! v_base = table(dimension).to_base(from, v)
//! v_dst  = table(dimension).from_base(to, v_base)
//! ```
//!
//! Dimensions are looked up by [`Dimension::NAME`] and units by [`Unit::name`].
//!
//! ```rust
//! use metrum_core::registry;
//!
//! let rpm = registry::convert("RotationalSpeed", 1.0, "RevolutionPerSecond", "RevolutionPerMinute");
//! assert_eq!(rpm.unwrap(), 60.0);
//! ```

use once_cell::sync::Lazy;
use std::collections::BTreeMap;
use std::fmt;

use crate::dimension::Dimension;
use crate::error::{RegistryError, UnsupportedUnitError};
use crate::unit::Unit;
use crate::units::{
    acceleration::Acceleration, angle::Angle, length::Length, rotational_speed::RotationalSpeed,
    temperature::Temperature,
};

static GLOBAL: Lazy<QuantityRegistry> = Lazy::new(QuantityRegistry::builtin);

// =============================================================================
// Erased dimension entries
// =============================================================================

/// Monomorphized entry points of one dimension.
#[derive(Clone, Copy)]
struct DimensionEntry {
    base_unit: &'static str,
    units: fn() -> Vec<&'static str>,
    convert: fn(f64, &str, &str) -> Result<f64, UnsupportedUnitError>,
}

impl DimensionEntry {
    fn of<D: Dimension>() -> Self {
        Self {
            base_unit: D::BASE_UNIT.name(),
            units: unit_names::<D>,
            convert: convert_named::<D>,
        }
    }
}

impl fmt::Debug for DimensionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DimensionEntry")
            .field("base_unit", &self.base_unit)
            .finish_non_exhaustive()
    }
}

fn unit_names<D: Dimension>() -> Vec<&'static str> {
    D::conversion_table().units().map(Unit::name).collect()
}

fn parse_unit<D: Dimension>(name: &str) -> Result<D::Unit, UnsupportedUnitError> {
    <D::Unit as Unit>::from_name(name).ok_or_else(|| UnsupportedUnitError::new(name, D::NAME))
}

fn convert_named<D: Dimension>(value: f64, from: &str, to: &str) -> Result<f64, UnsupportedUnitError> {
    let from = parse_unit::<D>(from)?;
    let to = parse_unit::<D>(to)?;
    D::conversion_table().convert(value, from, to)
}

// =============================================================================
// Registry
// =============================================================================

/// Dimensions addressable by name.
#[derive(Debug, Clone, Default)]
pub struct QuantityRegistry {
    dimensions: BTreeMap<&'static str, DimensionEntry>,
}

impl QuantityRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry of every dimension shipped with the crate.
    pub fn builtin() -> Self {
        Self::new()
            .with_dimension::<Acceleration>()
            .with_dimension::<Angle>()
            .with_dimension::<Length>()
            .with_dimension::<RotationalSpeed>()
            .with_dimension::<Temperature>()
    }

    /// The process-wide registry of shipped dimensions.
    pub fn global() -> &'static QuantityRegistry {
        &GLOBAL
    }

    /// Builder: register `D` under [`Dimension::NAME`], replacing any previous entry of that name.
    pub fn with_dimension<D: Dimension>(mut self) -> Self {
        self.register::<D>();
        self
    }

    /// Registers `D` under [`Dimension::NAME`], replacing any previous entry of that name.
    pub fn register<D: Dimension>(&mut self) {
        if self.dimensions.insert(D::NAME, DimensionEntry::of::<D>()).is_some() {
            log::debug!("replaced registry entry for dimension {}", D::NAME);
        }
    }

    /// Names of the registered dimensions, sorted.
    pub fn dimensions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.dimensions.keys().copied()
    }

    /// Whether `dimension` is registered.
    pub fn contains(&self, dimension: &str) -> bool {
        self.dimensions.contains_key(dimension)
    }

    /// Unit names of `dimension`, base unit first.
    pub fn units(&self, dimension: &str) -> Result<Vec<&'static str>, RegistryError> {
        Ok((self.entry(dimension)?.units)())
    }

    /// Base unit name of `dimension`.
    pub fn base_unit(&self, dimension: &str) -> Result<&'static str, RegistryError> {
        Ok(self.entry(dimension)?.base_unit)
    }

    /// Converts `value` between two units of `dimension`, all given by name.
    pub fn convert(&self, dimension: &str, value: f64, from: &str, to: &str) -> Result<f64, RegistryError> {
        let entry = self.entry(dimension)?;
        Ok((entry.convert)(value, from, to)?)
    }

    fn entry(&self, dimension: &str) -> Result<&DimensionEntry, RegistryError> {
        self.dimensions
            .get(dimension)
            .ok_or_else(|| RegistryError::UnknownDimension(dimension.to_string()))
    }
}

/// Converts through the process-wide registry. See [`QuantityRegistry::convert`].
pub fn convert(dimension: &str, value: f64, from: &str, to: &str) -> Result<f64, RegistryError> {
    QuantityRegistry::global().convert(dimension, value, from, to)
}
