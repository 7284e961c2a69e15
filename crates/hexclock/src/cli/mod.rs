//! CLI subcommands — interactive clock, one-shot frames, transforms, timezones, config.

mod config_cmd;
mod display;
mod input;
mod now;
mod run;
mod timezones;
mod transform_cmd;

use std::path::Path;

use clap::Subcommand;
use serde::Serialize;

pub(super) use crate::RUNNING;
pub(super) use hexclock_lib::clock::{ClockOptions, HexClock};
pub(super) use hexclock_lib::config::Config;
pub(super) use hexclock_lib::error::Result;
pub(super) use hexclock_lib::scheduler::{self, FrameKind};
pub(super) use hexclock_lib::time::{self, TimezoneEntry};
pub(super) use hexclock_lib::{DisplayMode, HexColor, HexclockError};

const PADDING: usize = 2;

/// Compute alignment width for a command's key-value output.
/// Ensures at least PADDING spaces after the longest key in either level,
/// with top-level and indent values aligned to the same column.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let top_max = top.iter().map(|k| k.len()).max().unwrap_or(0);
    let indent_max = indent.iter().map(|k| k.len()).max().unwrap_or(0);
    let top_need = if top.is_empty() { 0 } else { top_max + PADDING };
    // Indent keys lose 2 chars of inner width to the "  " prefix
    let indent_need = if indent.is_empty() {
        0
    } else {
        indent_max + PADDING + 2
    };
    top_need.max(indent_need)
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<width$}{value}", width = w)
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{}", format_kv(key, value, w));
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {key:<width$}{value}", width = w - 2);
}

/// Serialize to pretty JSON and print it.
pub(super) fn print_json(value: &impl Serialize) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| HexclockError::Io(std::io::Error::other(e)))?;
    println!("{text}");
    Ok(())
}

/// Load the config from `custom_path`, or the platform default.
pub(super) fn load_config(custom_path: Option<&Path>) -> Config {
    match custom_path {
        Some(path) => {
            let (config, warnings) = Config::load_from(path);
            for w in &warnings {
                log::warn!("{w}");
            }
            config
        }
        None => Config::load(),
    }
}

/// Clock selection flags shared by `run` and `now`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ClockArgs {
    /// IANA timezone, e.g. Europe/Paris (default: config, then host)
    #[arg(long, short = 't')]
    timezone: Option<String>,

    /// Display mode: normal, inverted or reversed (default: config)
    #[arg(long, short = 'm')]
    mode: Option<DisplayMode>,

    /// Show the date (#DDMMYY) instead of the time
    #[arg(long)]
    date: bool,
}

impl ClockArgs {
    /// Build clock options: config first, then these flags on top.
    pub(super) fn options(&self, config: &Config) -> Result<ClockOptions> {
        let mut options = ClockOptions::from_config(config, time::host_timezone());
        if let Some(tz) = &self.timezone {
            time::resolve_timezone(tz)?;
            options.timezone = tz.trim().to_string();
        }
        if let Some(mode) = self.mode {
            options.mode = mode;
        }
        if self.date {
            options.start_in_date_mode = true;
        }
        Ok(options)
    }
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct NowOutput {
    pub hex: String,
    pub raw: String,
    pub mode: DisplayMode,
    pub kind: FrameKind,
    pub timezone: String,
}

#[derive(Serialize)]
pub(super) struct TransformOutput {
    pub input: String,
    pub mode: DisplayMode,
    pub hex: String,
}

#[derive(Serialize)]
pub(super) struct TimezonesOutput {
    pub count: usize,
    pub host: String,
    pub timezones: Vec<TimezoneEntry>,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub config_file: Option<String>,
    pub config_file_exists: bool,
    pub settings: Config,
    pub host_timezone: String,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the clock in this terminal (reads commands from stdin)
    Run {
        #[command(flatten)]
        clock: ClockArgs,
        /// Hide the hex label
        #[arg(long)]
        no_label: bool,
    },

    /// Print the current hex color once
    Now {
        #[command(flatten)]
        clock: ClockArgs,
    },

    /// Apply a display mode to a hex color
    Transform {
        /// Color as #RRGGBB or #RGB (the leading # is optional)
        hex: String,
        /// Display mode: normal, inverted or reversed
        #[arg(long, short = 'm', default_value = "normal")]
        mode: DisplayMode,
    },

    /// List supported timezones
    Timezones {
        /// Only show identifiers containing this text (case-insensitive)
        #[arg(long)]
        filter: Option<String>,
    },

    /// Show current configuration and file paths
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Warn if `--json` was passed to a command that doesn't support it.
fn warn_json_unsupported(cmd_name: &str) {
    log::warn!("--json is not supported for `{cmd_name}` (ignored)");
}

pub fn run(cmd: Command, json: bool, config_path: Option<&Path>) -> Result<()> {
    match cmd {
        Command::Run { clock, no_label } => {
            if json {
                warn_json_unsupported("run");
            }
            run::cmd_run(&clock, no_label, config_path)
        }
        Command::Now { clock } => now::cmd_now(&clock, json, config_path),
        Command::Transform { hex, mode } => transform_cmd::cmd_transform(&hex, mode, json),
        Command::Timezones { filter } => timezones::cmd_timezones(filter.as_deref(), json),
        Command::Config { init } => config_cmd::cmd_config(json, init, config_path),
    }
}
