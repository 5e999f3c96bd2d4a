//! Quantity type and its implementations.

use core::any::{Any, TypeId};
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::Sum;
use core::marker::PhantomData;
use core::ops::*;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::abbreviation::AbbreviationCache;
use crate::config::FormatConfig;
use crate::dimension::{Dimension, QuantityInfo};
use crate::error::{FormatError, InvalidComparisonError, MissingAbbreviationError, UnsupportedUnitError};
use crate::format::Formatter;
use crate::locale::Locale;
use crate::unit::Unit;

/// A physical quantity of dimension `D`.
///
/// `Quantity<D>` wraps an `f64` magnitude that is always expressed in `D`'s base unit. Conversions
/// happen only at the edges: when a quantity is created from a value in some unit, and when it is
/// read back or rendered in some unit. Arithmetic and comparison operate on the stored base value.
///
/// The dimension is a phantom type parameter, so mixing dimensions is a compile-time error:
///
/// ```rust,compile_fail
/// use metrum_core::Quantity;
/// use metrum_core::length::Length;
/// use metrum_core::angle::Angle;
///
/// let _ = Quantity::<Length>::from_meters(1.0) + Quantity::<Angle>::from_radians(1.0);
/// ```
///
/// # Examples
///
/// ```rust
/// use metrum_core::Quantity;
/// use metrum_core::rotational_speed::RotationalSpeed;
///
/// let speed = Quantity::<RotationalSpeed>::from_revolutions_per_second(1.0);
/// assert_eq!(speed.revolutions_per_minute(), 60.0);
/// ```
pub struct Quantity<D: Dimension> {
    value: f64,
    _dimension: PhantomData<fn() -> D>,
}

/// How [`Quantity::equals_within`] interprets its tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonType {
    /// `|a - b| <= tolerance * max(|a|, |b|)`.
    Relative,
    /// `|a - b| <= tolerance`, with the tolerance in base units.
    Absolute,
}

impl<D: Dimension> Quantity<D> {
    /// Creates a quantity from a magnitude already expressed in the base unit.
    #[inline]
    pub const fn from_base_value(value: f64) -> Self {
        Self {
            value,
            _dimension: PhantomData,
        }
    }

    /// The zero quantity.
    ///
    /// ```rust
    /// use metrum_core::Quantity;
    /// use metrum_core::acceleration::Acceleration;
    ///
    /// assert_eq!(Quantity::<Acceleration>::zero().value(), 0.0);
    /// ```
    #[inline]
    pub const fn zero() -> Self {
        Self::from_base_value(0.0)
    }

    /// Magnitude in the base unit.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// The unit the magnitude is stored in.
    #[inline]
    pub fn base_unit() -> D::Unit {
        D::BASE_UNIT
    }

    /// Name, base unit and units of this quantity's dimension.
    pub fn info() -> QuantityInfo<D::Unit> {
        D::info()
    }

    /// Creates a quantity from `value` expressed in `unit`.
    ///
    /// Fails when `unit` has no entry in the dimension's conversion table. Units of the shipped
    /// dimensions are always registered.
    ///
    /// ```rust
    /// use metrum_core::Quantity;
    /// use metrum_core::length::{Length, LengthUnit};
    ///
    /// let d = Quantity::<Length>::from_unit(2.0, LengthUnit::Kilometer).unwrap();
    /// assert_eq!(d.meters(), 2000.0);
    /// ```
    pub fn from_unit(value: f64, unit: D::Unit) -> Result<Self, UnsupportedUnitError> {
        let base = D::conversion_table().to_base(unit, value)?;
        Ok(Self::from_base_value(base))
    }

    /// Creates a quantity from `value` expressed in the unit named `unit_name`.
    ///
    /// ```rust
    /// use metrum_core::Quantity;
    /// use metrum_core::rotational_speed::RotationalSpeed;
    ///
    /// assert!(Quantity::<RotationalSpeed>::from_unit_name(1.0, "RevolutionPerMinute").is_ok());
    /// assert!(Quantity::<RotationalSpeed>::from_unit_name(1.0, "Meter").is_err());
    /// ```
    pub fn from_unit_name(value: f64, unit_name: &str) -> Result<Self, UnsupportedUnitError> {
        let unit = <D::Unit as Unit>::from_name(unit_name)
            .ok_or_else(|| UnsupportedUnitError::new(unit_name, D::NAME))?;
        Self::from_unit(value, unit)
    }

    /// Magnitude expressed in `unit`.
    pub fn as_unit(&self, unit: D::Unit) -> Result<f64, UnsupportedUnitError> {
        D::conversion_table().from_base(unit, self.value)
    }

    /// Absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        Self::from_base_value(self.value.abs())
    }

    /// The smaller of two quantities. A NaN operand loses to a number.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::from_base_value(self.value.min(other.value))
    }

    /// The larger of two quantities. A NaN operand loses to a number.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::from_base_value(self.value.max(other.value))
    }

    /// Total ordering by base magnitude.
    ///
    /// Unlike the relational operators this never reports "unordered": NaN sorts before every
    /// number and compares equal to NaN.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self.value.is_nan(), other.value.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self
                .value
                .partial_cmp(&other.value)
                .unwrap_or(Ordering::Equal),
        }
    }

    /// Exact equality of base magnitudes. `NaN` is not equal to itself.
    #[inline]
    pub fn equals(&self, other: &Self) -> bool {
        self.value == other.value
    }

    /// Equality within `tolerance`.
    ///
    /// ```rust
    /// use metrum_core::{ComparisonType, Quantity};
    /// use metrum_core::length::Length;
    ///
    /// let a = Quantity::<Length>::from_meters(100.0);
    /// let b = Quantity::<Length>::from_meters(100.5);
    /// assert!(a.equals_within(&b, 0.01, ComparisonType::Relative));
    /// assert!(!a.equals_within(&b, 0.1, ComparisonType::Absolute));
    /// ```
    pub fn equals_within(&self, other: &Self, tolerance: f64, comparison: ComparisonType) -> bool {
        let difference = (self.value - other.value).abs();
        match comparison {
            ComparisonType::Absolute => difference <= tolerance,
            ComparisonType::Relative => {
                difference <= tolerance * self.value.abs().max(other.value.abs())
            }
        }
    }

    /// Equality against a value of unknown type.
    ///
    /// `false` for anything that is not a `Quantity<D>`, including quantities of other dimensions.
    pub fn equals_any(&self, other: &dyn Any) -> bool {
        other
            .downcast_ref::<Self>()
            .is_some_and(|other| self.equals(other))
    }

    /// Ordering against a value of unknown type.
    ///
    /// ```rust
    /// use metrum_core::{InvalidComparisonError, Quantity};
    /// use metrum_core::length::Length;
    ///
    /// let d = Quantity::<Length>::from_meters(1.0);
    /// assert!(matches!(d.compare_any(None), Err(InvalidComparisonError::Null { .. })));
    /// assert!(matches!(d.compare_any(Some(&1.0_f64)), Err(InvalidComparisonError::TypeMismatch { .. })));
    /// ```
    pub fn compare_any(&self, other: Option<&dyn Any>) -> Result<Ordering, InvalidComparisonError> {
        let other = other.ok_or(InvalidComparisonError::Null { dimension: D::NAME })?;
        let other = other
            .downcast_ref::<Self>()
            .ok_or(InvalidComparisonError::TypeMismatch { expected: D::NAME })?;
        Ok(self.compare(other))
    }

    /// Preferred abbreviation of `unit` in `locale`, or in the configured default locale.
    ///
    /// ```rust
    /// use metrum_core::{Locale, Quantity};
    /// use metrum_core::rotational_speed::{RotationalSpeed, RotationalSpeedUnit};
    ///
    /// let abbr = Quantity::<RotationalSpeed>::abbreviation(
    ///     RotationalSpeedUnit::RevolutionPerMinute,
    ///     Some(&Locale::new("ru-RU")),
    /// )
    /// .unwrap();
    /// assert_eq!(abbr, "об/мин");
    /// ```
    pub fn abbreviation(
        unit: D::Unit,
        locale: Option<&Locale>,
    ) -> Result<String, MissingAbbreviationError> {
        let locale = locale.unwrap_or(&FormatConfig::global().default_locale);
        AbbreviationCache::global().abbreviation::<D>(unit, locale)
    }

    /// Renders this quantity in `unit`.
    ///
    /// `locale` and `significant_digits_after_radix` default to the installed [`FormatConfig`].
    ///
    /// ```rust
    /// use metrum_core::{Locale, Quantity};
    /// use metrum_core::length::{Length, LengthUnit};
    ///
    /// let d = Quantity::<Length>::from_meters(1234.5678);
    /// assert_eq!(
    ///     d.to_string_in(LengthUnit::Kilometer, Some(&Locale::invariant()), Some(3)).unwrap(),
    ///     "1.235 km"
    /// );
    /// ```
    pub fn to_string_in(
        &self,
        unit: D::Unit,
        locale: Option<&Locale>,
        significant_digits_after_radix: Option<u8>,
    ) -> Result<String, FormatError> {
        Formatter::global().format(self, unit, locale, significant_digits_after_radix)
    }

    /// Renders this quantity through a custom template.
    ///
    /// `{0}` is the rounded value, `{1}` the abbreviation and `{2}`, `{3}`, … the entries of `args`.
    pub fn to_string_with(
        &self,
        unit: D::Unit,
        locale: Option<&Locale>,
        template: &str,
        args: &[&dyn fmt::Display],
    ) -> Result<String, FormatError> {
        Formatter::global().format_with(self, unit, locale, template, args)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Core trait implementations
// ─────────────────────────────────────────────────────────────────────────────

impl<D: Dimension> Clone for Quantity<D> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: Dimension> Copy for Quantity<D> {}

impl<D: Dimension> Default for Quantity<D> {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl<D: Dimension> fmt::Debug for Quantity<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Quantity")
            .field("dimension", &D::NAME)
            .field("value", &self.value)
            .field("unit", &D::BASE_UNIT)
            .finish()
    }
}

/// Renders in the base unit with the configured locale.
///
/// The precision flag overrides the configured digits after the radix: `format!("{:.4}", q)`.
/// Rounding is to a fixed number of fractional digits, so magnitudes below half the last digit
/// render as `0` (`1e-20 m` displays as `0 m` with the default 2 digits). Pass more digits, or
/// render in a smaller unit with [`Quantity::to_string_in`], to keep them visible.
impl<D: Dimension> fmt::Display for Quantity<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = f.precision().map(|p| p.min(u8::MAX as usize) as u8);
        let formatter = Formatter::global();
        match formatter.format(self, D::BASE_UNIT, None, digits) {
            Ok(rendered) => f.write_str(&rendered),
            Err(e) => {
                log::warn!("falling back to unit name while displaying {}: {}", D::NAME, e);
                write!(
                    f,
                    "{} {}",
                    formatter.format_number(self.value, None, digits),
                    D::BASE_UNIT.name()
                )
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Equality, ordering and hashing
// ─────────────────────────────────────────────────────────────────────────────

/// Quantities of different dimensions are never equal.
impl<D: Dimension, E: Dimension> PartialEq<Quantity<E>> for Quantity<D> {
    #[inline]
    fn eq(&self, other: &Quantity<E>) -> bool {
        TypeId::of::<D>() == TypeId::of::<E>() && self.value == other.value
    }
}

impl<D: Dimension> PartialOrd for Quantity<D> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.value)
    }
}

/// `0.0` and `-0.0` compare equal, so they hash alike.
impl<D: Dimension> Hash for Quantity<D> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        TypeId::of::<D>().hash(state);
        let normalized = if self.value == 0.0 { 0.0 } else { self.value };
        normalized.to_bits().hash(state);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Operator implementations
// ─────────────────────────────────────────────────────────────────────────────

impl<D: Dimension> Neg for Quantity<D> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::from_base_value(-self.value)
    }
}

impl<D: Dimension> Add for Quantity<D> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::from_base_value(self.value + rhs.value)
    }
}

impl<D: Dimension> AddAssign for Quantity<D> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.value += rhs.value;
    }
}

impl<D: Dimension> Sub for Quantity<D> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::from_base_value(self.value - rhs.value)
    }
}

impl<D: Dimension> SubAssign for Quantity<D> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.value -= rhs.value;
    }
}

impl<D: Dimension> Mul<f64> for Quantity<D> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self {
        Self::from_base_value(self.value * rhs)
    }
}

impl<D: Dimension> Mul<Quantity<D>> for f64 {
    type Output = Quantity<D>;
    #[inline]
    fn mul(self, rhs: Quantity<D>) -> Self::Output {
        rhs * self
    }
}

impl<D: Dimension> MulAssign<f64> for Quantity<D> {
    #[inline]
    fn mul_assign(&mut self, rhs: f64) {
        self.value *= rhs;
    }
}

impl<D: Dimension> Div<f64> for Quantity<D> {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f64) -> Self {
        Self::from_base_value(self.value / rhs)
    }
}

impl<D: Dimension> DivAssign<f64> for Quantity<D> {
    #[inline]
    fn div_assign(&mut self, rhs: f64) {
        self.value /= rhs;
    }
}

/// The ratio of two quantities of one dimension is a plain number.
impl<D: Dimension> Div for Quantity<D> {
    type Output = f64;
    #[inline]
    fn div(self, rhs: Self) -> f64 {
        self.value / rhs.value
    }
}

impl<D: Dimension> Sum for Quantity<D> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl<'a, D: Dimension> Sum<&'a Quantity<D>> for Quantity<D> {
    fn sum<I: Iterator<Item = &'a Quantity<D>>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Serde support
// ─────────────────────────────────────────────────────────────────────────────

impl<D: Dimension> Serialize for Quantity<D> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.value.serialize(serializer)
    }
}

impl<'de, D: Dimension> Deserialize<'de> for Quantity<D> {
    fn deserialize<De>(deserializer: De) -> Result<Self, De::Error>
    where
        De: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Ok(Quantity::from_base_value(value))
    }
}

/// Serde helper module for serializing quantities together with their unit.
///
/// Serializes as `{"value": <magnitude in the base unit>, "unit": "<base unit name>"}`. On
/// deserialization the `unit` field may name any unit of the dimension and defaults to the base
/// unit when absent; the value is converted accordingly.
///
/// ```rust
/// use metrum_core::Quantity;
/// use metrum_core::length::Length;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Route {
///     #[serde(with = "metrum_core::serde_with_unit")]
///     total: Quantity<Length>, // {"value": 1200.0, "unit": "Meter"}
///     leg: Quantity<Length>,   // 400.0
/// }
/// ```
pub mod serde_with_unit {
    use super::*;
    use serde::de::{self, MapAccess, Visitor};
    use serde::ser::SerializeStruct;

    /// Serializes a `Quantity<D>` as a struct with `value` and `unit` fields.
    pub fn serialize<D, S>(quantity: &Quantity<D>, serializer: S) -> Result<S::Ok, S::Error>
    where
        D: Dimension,
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Quantity", 2)?;
        state.serialize_field("value", &quantity.value())?;
        state.serialize_field("unit", D::BASE_UNIT.name())?;
        state.end()
    }

    /// Deserializes a `Quantity<D>` from a struct with `value` and optionally `unit` fields.
    pub fn deserialize<'de, D, De>(deserializer: De) -> Result<Quantity<D>, De::Error>
    where
        D: Dimension,
        De: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(field_identifier, rename_all = "lowercase")]
        enum Field {
            Value,
            Unit,
        }

        struct QuantityVisitor<D>(PhantomData<fn() -> D>);

        impl<'de, D: Dimension> Visitor<'de> for QuantityVisitor<D> {
            type Value = Quantity<D>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "a {} quantity with value and unit fields", D::NAME)
            }

            fn visit_map<V>(self, mut map: V) -> Result<Quantity<D>, V::Error>
            where
                V: MapAccess<'de>,
            {
                let mut value: Option<f64> = None;
                let mut unit: Option<String> = None;

                while let Some(key) = map.next_key()? {
                    match key {
                        Field::Value => {
                            if value.is_some() {
                                return Err(de::Error::duplicate_field("value"));
                            }
                            value = Some(map.next_value()?);
                        }
                        Field::Unit => {
                            if unit.is_some() {
                                return Err(de::Error::duplicate_field("unit"));
                            }
                            unit = Some(map.next_value()?);
                        }
                    }
                }

                let value = value.ok_or_else(|| de::Error::missing_field("value"))?;
                match unit {
                    Some(name) => Quantity::from_unit_name(value, &name).map_err(de::Error::custom),
                    None => Ok(Quantity::from_base_value(value)),
                }
            }
        }

        deserializer.deserialize_struct("Quantity", &["value", "unit"], QuantityVisitor(PhantomData))
    }
}
