//! Minimal end-to-end example: convert a spindle speed and sum a few accelerations.

use metrum::prelude::*;

fn main() {
    let spindle = RotationalSpeed::from_revolutions_per_second(25.0);
    assert_eq!(spindle.revolutions_per_minute(), 1500.0);

    let total: Acceleration = [
        Acceleration::from_meters_per_second_squared(1.5),
        Acceleration::from_centimeters_per_second_squared(250.0),
        Acceleration::from_standard_gravity(1.0),
    ]
    .iter()
    .sum();
    assert!((total.meters_per_second_squared() - 13.80665).abs() < 1e-12);

    let boiling = Temperature::from_degrees_celsius(100.0);
    println!(
        "{} rpm, {}, {:.1} °F",
        spindle.revolutions_per_minute(),
        total,
        boiling.degrees_fahrenheit()
    );
}
