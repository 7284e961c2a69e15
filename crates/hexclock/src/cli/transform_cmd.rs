//! `transform` subcommand — apply a display mode to a user-supplied color.

use super::{DisplayMode, HexColor, Result, TransformOutput, print_json};

pub(super) fn cmd_transform(input: &str, mode: DisplayMode, json: bool) -> Result<()> {
    let color = HexColor::parse(input)?;
    let out = hexclock_lib::transform(color, mode);

    if json {
        return print_json(&TransformOutput {
            input: color.to_string(),
            mode,
            hex: out.to_string(),
        });
    }

    println!("{out}");
    Ok(())
}
