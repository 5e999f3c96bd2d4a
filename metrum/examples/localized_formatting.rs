//! Rendering one quantity in several locales and through a custom template.

use metrum::prelude::*;

fn main() -> Result<(), metrum::FormatError> {
    let spindle = RotationalSpeed::from_revolutions_per_minute(1234.5678);
    let rpm = RotationalSpeedUnit::RevolutionPerMinute;

    for tag in ["en-US", "ru-RU", "de-DE", "nb-NO", "ja-JP"] {
        let locale = Locale::new(tag);
        println!("{tag:>6}: {}", spindle.to_string_in(rpm, Some(&locale), Some(1))?);
    }

    let label = "spindle";
    let line = spindle.to_string_with(rpm, Some(&Locale::invariant()), "{2} at {0} {1}", &[&label])?;
    assert_eq!(line, "spindle at 1,234.57 rpm");
    println!("{line}");

    Ok(())
}
