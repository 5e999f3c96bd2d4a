//! Per-dimension conversion tables.
//!
//! Every quantity is stored in its dimension's base unit. A table holds one
//! [`ConversionEntry`] per registered unit:
//!
//! ```text
//! v_base = entry.to_base(v_unit)
//! v_unit = entry.from_base(v_base)
//! ```
//!
//! For the base unit both functions are the identity. Lookups of a unit that has no entry
//! fail with [`UnsupportedUnitError`]; there is no fallback to the base unit.

use crate::error::UnsupportedUnitError;
use crate::unit::Unit;

fn identity(value: f64) -> f64 {
    value
}

/// Conversion functions for one unit.
#[derive(Debug, Clone, Copy)]
pub struct ConversionEntry<U> {
    unit: U,
    to_base: fn(f64) -> f64,
    from_base: fn(f64) -> f64,
}

impl<U: Unit> ConversionEntry<U> {
    /// Creates an entry from a pair of conversion functions.
    ///
    /// `from_base` must invert `to_base` within floating-point tolerance.
    pub const fn new(unit: U, to_base: fn(f64) -> f64, from_base: fn(f64) -> f64) -> Self {
        Self {
            unit,
            to_base,
            from_base,
        }
    }

    /// Entry whose conversions are both the identity (the base unit).
    pub const fn identity(unit: U) -> Self {
        Self::new(unit, identity, identity)
    }

    /// The unit this entry converts.
    pub fn unit(&self) -> U {
        self.unit
    }

    /// Converts a value in this unit to the base unit.
    #[inline]
    pub fn to_base(&self, value: f64) -> f64 {
        (self.to_base)(value)
    }

    /// Converts a base-unit value to this unit.
    #[inline]
    pub fn from_base(&self, value: f64) -> f64 {
        (self.from_base)(value)
    }
}

/// The set of units a dimension can convert between.
#[derive(Debug, Clone)]
pub struct ConversionTable<U> {
    dimension: &'static str,
    base_unit: U,
    entries: Vec<ConversionEntry<U>>,
}

impl<U: Unit> ConversionTable<U> {
    /// Builds a table.
    ///
    /// The base unit always converts by identity: an entry given for it is replaced, and one is
    /// added if missing. A unit listed twice keeps its first entry.
    pub fn new(dimension: &'static str, base_unit: U, entries: Vec<ConversionEntry<U>>) -> Self {
        let mut table: Vec<ConversionEntry<U>> = Vec::with_capacity(entries.len() + 1);
        table.push(ConversionEntry::identity(base_unit));
        for entry in entries {
            if table.iter().all(|existing| existing.unit != entry.unit) {
                table.push(entry);
            }
        }

        Self {
            dimension,
            base_unit,
            entries: table,
        }
    }

    /// Dimension name.
    pub fn dimension(&self) -> &'static str {
        self.dimension
    }

    /// Base unit.
    pub fn base_unit(&self) -> U {
        self.base_unit
    }

    /// Registered units, base unit first.
    pub fn units(&self) -> impl Iterator<Item = U> + '_ {
        self.entries.iter().map(|entry| entry.unit)
    }

    /// Whether `unit` has an entry.
    pub fn contains(&self, unit: U) -> bool {
        self.entries.iter().any(|entry| entry.unit == unit)
    }

    /// The entry registered for `unit`.
    pub fn entry(&self, unit: U) -> Result<&ConversionEntry<U>, UnsupportedUnitError> {
        self.entries
            .iter()
            .find(|entry| entry.unit == unit)
            .ok_or_else(|| UnsupportedUnitError::new(unit.name(), self.dimension))
    }

    /// Converts `value` expressed in `unit` to the base unit.
    pub fn to_base(&self, unit: U, value: f64) -> Result<f64, UnsupportedUnitError> {
        Ok(self.entry(unit)?.to_base(value))
    }

    /// Converts a base-unit `value` to `unit`.
    pub fn from_base(&self, unit: U, value: f64) -> Result<f64, UnsupportedUnitError> {
        Ok(self.entry(unit)?.from_base(value))
    }

    /// Converts `value` from one unit to another, through the base unit.
    pub fn convert(&self, value: f64, from: U, to: U) -> Result<f64, UnsupportedUnitError> {
        if from == to {
            self.entry(from)?;
            return Ok(value);
        }
        let base = self.to_base(from, value)?;
        self.from_base(to, base)
    }
}
