//! `now` subcommand — print the current frame once and exit.

use std::path::Path;

use hexclock_lib::time::{SystemTimeSource, TimeSource};

use super::{ClockArgs, NowOutput, Result, kv, kv_width, load_config, print_json, scheduler};

pub(super) fn cmd_now(args: &ClockArgs, json: bool, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path);
    let options = args.options(&config)?;
    let now = SystemTimeSource.now();

    // Dates come from the host calendar, same as the interactive clock.
    let (frame, timezone) = if options.start_in_date_mode {
        let frame = scheduler::date_frame(now, &options.host_timezone, options.mode);
        (frame, options.host_timezone)
    } else {
        let frame = scheduler::time_frame(now, &options.timezone, options.mode);
        (frame, options.timezone)
    };

    if json {
        return print_json(&NowOutput {
            hex: frame.color.to_string(),
            raw: frame.raw.to_string(),
            mode: options.mode,
            kind: frame.kind,
            timezone,
        });
    }

    let w = kv_width(&["Color:", "Raw:", "Mode:", "Timezone:"], &[]);
    kv("Color:", frame.color, w);
    kv("Raw:", frame.raw, w);
    kv("Mode:", options.mode, w);
    kv("Timezone:", &timezone, w);
    Ok(())
}
