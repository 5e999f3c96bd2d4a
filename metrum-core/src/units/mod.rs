//! Predefined dimensions.
//!
//! Each module declares a dimension tag and its unit enum. `#[derive(Unit)]` turns the declaration
//! into the dimension's conversion table plus one `from_<unit>` factory and one `<unit>` accessor
//! per unit on [`crate::Quantity`].
//!
//! ## Modules
//!
//! - [`acceleration`]: metre per second squared is the base unit; knots per time and standard gravity.
//! - [`angle`]: radian is the base unit; degrees, gradians, revolutions and arc subdivisions.
//! - [`length`]: metre is the base unit; metric and international imperial units.
//! - [`rotational_speed`]: radian per second is the base unit; degree and revolution rates.
//! - [`temperature`]: kelvin is the base unit; affine Celsius and Fahrenheit scales.

pub mod acceleration;
pub mod angle;
pub mod length;
pub mod rotational_speed;
pub mod temperature;
