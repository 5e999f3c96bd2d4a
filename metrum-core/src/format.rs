//! Rendering quantities as localized strings.
//!
//! The pipeline is: convert the base magnitude to the target unit, round it to a number of digits
//! after the radix, render it with the locale's separators, resolve the unit abbreviation and
//! interpolate both into a template.
//!
//! # Rounding
//!
//! Rounding works on the shortest decimal representation of the `f64` (the one `{}` prints), not
//! on its binary value, and rounds half away from zero at the requested digit. `2.675` therefore
//! rounds to `2.68` even though the nearest double is slightly below `2.675`. Trailing fractional
//! zeros are dropped and a value that rounds to zero never renders as `-0`.

use core::fmt::{self, Display, Write};

use crate::abbreviation::AbbreviationCache;
use crate::config::FormatConfig;
use crate::dimension::Dimension;
use crate::error::FormatError;
use crate::locale::{Locale, NumberFormat};
use crate::quantity::Quantity;

/// Renders quantities using an abbreviation cache and a configuration.
#[derive(Debug, Clone, Copy)]
pub struct Formatter<'a> {
    cache: &'a AbbreviationCache,
    config: &'a FormatConfig,
}

impl Formatter<'static> {
    /// Formatter over the process-wide cache and configuration.
    pub fn global() -> Self {
        Self::new(AbbreviationCache::global(), FormatConfig::global())
    }
}

impl<'a> Formatter<'a> {
    /// Creates a formatter.
    pub fn new(cache: &'a AbbreviationCache, config: &'a FormatConfig) -> Self {
        Self { cache, config }
    }

    /// The configuration supplying defaults.
    pub fn config(&self) -> &'a FormatConfig {
        self.config
    }

    /// Renders `quantity` in `unit` through the configured template.
    ///
    /// `locale` and `significant_digits_after_radix` fall back to the configuration.
    pub fn format<D: Dimension>(
        &self,
        quantity: &Quantity<D>,
        unit: D::Unit,
        locale: Option<&Locale>,
        significant_digits_after_radix: Option<u8>,
    ) -> Result<String, FormatError> {
        let digits =
            significant_digits_after_radix.unwrap_or(self.config.significant_digits_after_radix);
        self.render(quantity, unit, locale, digits, &self.config.template, &[])
    }

    /// Renders `quantity` in `unit` through `template`.
    ///
    /// `{0}` is the rounded value, `{1}` the abbreviation, `{2}` onwards the entries of `args`.
    /// Literal braces are written `{{` and `}}`.
    pub fn format_with<D: Dimension>(
        &self,
        quantity: &Quantity<D>,
        unit: D::Unit,
        locale: Option<&Locale>,
        template: &str,
        args: &[&dyn Display],
    ) -> Result<String, FormatError> {
        let digits = self.config.significant_digits_after_radix;
        self.render(quantity, unit, locale, digits, template, args)
    }

    /// Renders a bare number with the separators of `locale`.
    pub fn format_number(
        &self,
        value: f64,
        locale: Option<&Locale>,
        significant_digits_after_radix: Option<u8>,
    ) -> String {
        let locale = locale.unwrap_or(&self.config.default_locale);
        let digits =
            significant_digits_after_radix.unwrap_or(self.config.significant_digits_after_radix);
        render_number(value, digits, &self.config.number_format(locale))
    }

    fn render<D: Dimension>(
        &self,
        quantity: &Quantity<D>,
        unit: D::Unit,
        locale: Option<&Locale>,
        digits: u8,
        template: &str,
        args: &[&dyn Display],
    ) -> Result<String, FormatError> {
        let locale = locale.unwrap_or(&self.config.default_locale);
        let value = quantity.as_unit(unit)?;
        let number = render_number(value, digits, &self.config.number_format(locale));
        let abbreviation = self.cache.abbreviation::<D>(unit, locale)?;

        let mut positional: Vec<&dyn Display> = Vec::with_capacity(args.len() + 2);
        positional.push(&number);
        positional.push(&abbreviation);
        positional.extend_from_slice(args);

        apply_template(template, &positional)
    }
}

/// Rounds `value` to `digits` after the radix, half away from zero.
///
/// This is the magnitude a formatted string represents; parsing the rendered number back yields
/// exactly this value.
///
/// ```rust
/// use metrum_core::round_to_radix;
///
/// assert_eq!(round_to_radix(2.675, 2), 2.68);
/// assert_eq!(round_to_radix(-0.5, 0), -1.0);
/// assert_eq!(round_to_radix(0.004, 2), 0.0);
/// ```
pub fn round_to_radix(value: f64, digits: u8) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let rounded = RoundedDecimal::new(value, digits);
    let mut text = String::new();
    if rounded.negative {
        text.push('-');
    }
    text.push_str(&rounded.integer);
    if !rounded.fraction.is_empty() {
        text.push('.');
        text.push_str(&rounded.fraction);
    }
    text.parse().unwrap_or(value)
}

fn render_number(value: f64, digits: u8, format: &NumberFormat) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let rounded = RoundedDecimal::new(value, digits);
    let mut out = String::with_capacity(rounded.integer.len() + rounded.fraction.len() + 4);
    if rounded.negative {
        out.push('-');
    }
    out.push_str(&group_digits(&rounded.integer, &format.group_separator));
    if !rounded.fraction.is_empty() {
        out.push_str(&format.decimal_separator);
        out.push_str(&rounded.fraction);
    }
    out
}

fn group_digits(integer: &str, separator: &str) -> String {
    if separator.is_empty() || integer.len() <= 3 {
        return integer.to_string();
    }
    let mut out = String::with_capacity(integer.len() + integer.len() / 3 * separator.len());
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(c);
    }
    out
}

/// A finite value rounded to a fixed number of fractional digits, as decimal digit strings.
#[derive(Debug, PartialEq, Eq)]
struct RoundedDecimal {
    negative: bool,
    integer: String,
    /// Without trailing zeros.
    fraction: String,
}

impl RoundedDecimal {
    fn new(value: f64, digits: u8) -> Self {
        // `{:e}` yields the shortest representation that round-trips, e.g. "2.675e0".
        let scientific = format!("{:e}", value.abs());
        let (mantissa, exponent) = scientific
            .split_once('e')
            .unwrap_or((scientific.as_str(), "0"));
        let exponent: i64 = exponent.parse().unwrap_or(0);

        let mut mantissa_digits: Vec<u8> = mantissa
            .bytes()
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .collect();
        // Number of digits in front of the radix point.
        let mut point = exponent + 1;

        let keep = point + i64::from(digits);
        if keep < 0 {
            mantissa_digits.clear();
        } else if (keep as usize) < mantissa_digits.len() {
            let round_up = mantissa_digits[keep as usize] >= 5;
            mantissa_digits.truncate(keep as usize);
            if round_up && increment(&mut mantissa_digits) {
                point += 1;
            }
        }

        let integer = if point <= 0 {
            "0".to_string()
        } else {
            (0..point as usize)
                .map(|i| char::from(b'0' + mantissa_digits.get(i).copied().unwrap_or(0)))
                .collect()
        };
        let integer = match integer.trim_start_matches('0') {
            "" => "0".to_string(),
            trimmed => trimmed.to_string(),
        };

        let mut fraction: String = if point < 0 {
            core::iter::repeat('0')
                .take(point.unsigned_abs() as usize)
                .chain(mantissa_digits.iter().map(|&d| char::from(b'0' + d)))
                .collect()
        } else {
            mantissa_digits
                .iter()
                .skip(point as usize)
                .map(|&d| char::from(b'0' + d))
                .collect()
        };
        fraction.truncate(usize::from(digits));
        let fraction = fraction.trim_end_matches('0').to_string();

        let negative = value.is_sign_negative() && (integer != "0" || !fraction.is_empty());

        Self {
            negative,
            integer,
            fraction,
        }
    }
}

/// Adds one unit in the last place. Returns `true` when a new leading digit was created.
fn increment(digits: &mut Vec<u8>) -> bool {
    for digit in digits.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            return false;
        }
    }
    digits.insert(0, 1);
    true
}

/// Substitutes `{n}` placeholders with `args[n]`.
fn apply_template(template: &str, args: &[&dyn Display]) -> Result<String, FormatError> {
    let invalid = |reason: String| FormatError::InvalidTemplate {
        template: template.to_string(),
        reason,
    };

    let mut out = String::with_capacity(template.len() + 16);
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut index = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(d) => index.push(d),
                        None => return Err(invalid("unclosed `{`".to_string())),
                    }
                }
                let position: usize = index
                    .trim()
                    .parse()
                    .map_err(|_| invalid(format!("`{{{}}}` is not a positional placeholder", index)))?;
                let arg = args.get(position).ok_or_else(|| {
                    invalid(format!(
                        "placeholder {{{}}} has no argument ({} supplied)",
                        position,
                        args.len()
                    ))
                })?;
                write!(out, "{}", arg).map_err(|e: fmt::Error| invalid(e.to_string()))?;
            }
            '}' => return Err(invalid("unmatched `}`".to_string())),
            other => out.push(other),
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abbreviation::NoAbbreviations;
    use crate::length::{Length, LengthUnit};
    use crate::rotational_speed::{RotationalSpeed, RotationalSpeedUnit};
    use proptest::prelude::*;

    fn invariant() -> NumberFormat {
        NumberFormat::default()
    }

    #[test]
    fn rounds_half_away_from_zero_on_decimal_digits() {
        assert_eq!(render_number(2.675, 2, &invariant()), "2.68");
        assert_eq!(render_number(-2.675, 2, &invariant()), "-2.68");
        assert_eq!(render_number(0.125, 2, &invariant()), "0.13");
        assert_eq!(render_number(2.5, 0, &invariant()), "3");
        assert_eq!(render_number(-2.5, 0, &invariant()), "-3");
    }

    #[test]
    fn trims_trailing_zeros() {
        assert_eq!(render_number(1.5, 3, &invariant()), "1.5");
        assert_eq!(render_number(2.0, 2, &invariant()), "2");
        assert_eq!(render_number(1.999, 2, &invariant()), "2");
    }

    #[test]
    fn carry_creates_new_leading_digit() {
        assert_eq!(render_number(999.996, 2, &invariant()), "1,000");
        assert_eq!(render_number(0.005, 2, &invariant()), "0.01");
        assert_eq!(render_number(0.0049, 2, &invariant()), "0");
    }

    #[test]
    fn no_negative_zero() {
        assert_eq!(render_number(-0.001, 2, &invariant()), "0");
        assert_eq!(render_number(-0.0, 2, &invariant()), "0");
    }

    #[test]
    fn tiny_and_huge_values() {
        assert_eq!(render_number(1e-20, 2, &invariant()), "0");
        assert_eq!(render_number(1.5e21, 0, &NumberFormat::new(".", "")), "1500000000000000000000");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(render_number(f64::NAN, 2, &invariant()), "NaN");
        assert_eq!(render_number(f64::INFINITY, 2, &invariant()), "∞");
        assert_eq!(render_number(f64::NEG_INFINITY, 2, &invariant()), "-∞");
        assert!(round_to_radix(f64::NAN, 2).is_nan());
    }

    #[test]
    fn locale_separators() {
        let german = NumberFormat::new(",", ".");
        assert_eq!(render_number(1234567.891, 2, &german), "1.234.567,89");
        let russian = NumberFormat::new(",", "\u{a0}");
        assert_eq!(render_number(-12345.5, 1, &russian), "-12\u{a0}345,5");
        assert_eq!(render_number(123.0, 2, &german), "123");
    }

    #[test]
    fn template_substitution() {
        let number = "1.5";
        let abbr = "km";
        let extra = 3;
        let args: [&dyn Display; 3] = [&number, &abbr, &extra];
        assert_eq!(apply_template("{0} {1}", &args).unwrap(), "1.5 km");
        assert_eq!(apply_template("{1}={0} ({2})", &args).unwrap(), "km=1.5 (3)");
        assert_eq!(apply_template("{{{0}}}", &args).unwrap(), "{1.5}");
    }

    #[test]
    fn template_errors() {
        let number = "1";
        let args: [&dyn Display; 1] = [&number];
        assert!(matches!(
            apply_template("{0} {1}", &args),
            Err(FormatError::InvalidTemplate { .. })
        ));
        assert!(apply_template("{0", &args).is_err());
        assert!(apply_template("{x}", &args).is_err());
        assert!(apply_template("0}", &args).is_err());
    }

    #[test]
    fn formatter_uses_config_defaults() {
        let cache = AbbreviationCache::new(NoAbbreviations);
        let config = FormatConfig::default()
            .with_default_locale("de-DE")
            .with_significant_digits_after_radix(1);
        let formatter = Formatter::new(&cache, &config);

        let d = Quantity::<Length>::from_meters(1234.56);
        assert_eq!(formatter.format(&d, LengthUnit::Meter, None, None).unwrap(), "1.234,6 m");
        assert_eq!(
            formatter
                .format(&d, LengthUnit::Kilometer, Some(&Locale::invariant()), Some(3))
                .unwrap(),
            "1.235 km"
        );
    }

    #[test]
    fn formatter_with_template_and_extra_args() {
        let cache = AbbreviationCache::new(NoAbbreviations);
        let config = FormatConfig::default();
        let formatter = Formatter::new(&cache, &config);

        let speed = Quantity::<RotationalSpeed>::from_revolutions_per_minute(1500.0);
        let label = "spindle";
        let rendered = formatter
            .format_with(
                &speed,
                RotationalSpeedUnit::RevolutionPerMinute,
                None,
                "{2}: {0}{1}",
                &[&label],
            )
            .unwrap();
        assert_eq!(rendered, "spindle: 1,500rpm");
    }

    #[test]
    fn formatter_uses_custom_config_template() {
        let cache = AbbreviationCache::new(NoAbbreviations);
        let config = FormatConfig::default().with_template("{1} {0}");
        let formatter = Formatter::new(&cache, &config);

        let d = Quantity::<Length>::from_meters(2.0);
        assert_eq!(formatter.format(&d, LengthUnit::Meter, None, None).unwrap(), "m 2");
    }

    proptest! {
        #[test]
        fn prop_rendering_reproduces_rounded_magnitude(value in -1e12..1e12f64, digits in 0u8..6) {
            let plain = NumberFormat::new(".", "");
            let rendered = render_number(value, digits, &plain);
            let parsed: f64 = rendered.parse().unwrap();
            prop_assert_eq!(parsed, round_to_radix(value, digits));
        }

        #[test]
        fn prop_rounding_is_idempotent(value in -1e9..1e9f64, digits in 0u8..6) {
            let once = round_to_radix(value, digits);
            prop_assert_eq!(round_to_radix(once, digits), once);
        }

        #[test]
        fn prop_rounding_error_is_bounded(value in -1e6..1e6f64, digits in 0u8..6) {
            let bound = 0.5 * 10f64.powi(-i32::from(digits)) * (1.0 + 1e-9) + value.abs() * 1e-15;
            prop_assert!((round_to_radix(value, digits) - value).abs() <= bound);
        }
    }
}
