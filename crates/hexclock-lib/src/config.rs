//! Application configuration — TOML-based, platform-aware paths.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::rainbow::RainbowSettings;
use crate::time;
use crate::transform::DisplayMode;

/// Header comment prepended to saved config files.
const CONFIG_HEADER: &str =
    "# hexclock configuration — changes made outside the app may be overwritten.\n\n";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// IANA timezone to display. Empty = the host's timezone.
    #[serde(default)]
    pub timezone: String,

    /// Initial display mode: "normal", "inverted" or "reversed".
    #[serde(default)]
    pub mode: DisplayMode,

    /// Start on the date frame instead of the ticking clock.
    #[serde(default)]
    pub start_in_date_mode: bool,

    /// Milliseconds between rainbow hue steps. Default: 10.
    #[serde(default = "default_rainbow_interval_ms")]
    pub rainbow_interval_ms: u64,

    /// Degrees the rainbow hue advances per step (1-359). Default: 1.
    #[serde(default = "default_rainbow_hue_step")]
    pub rainbow_hue_step: u16,

    /// Print the hex label in the middle of the terminal.
    #[serde(default = "default_true")]
    pub show_label: bool,
}

fn default_rainbow_interval_ms() -> u64 {
    10
}
fn default_rainbow_hue_step() -> u16 {
    1
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Config {
            timezone: String::new(),
            mode: DisplayMode::Normal,
            start_in_date_mode: false,
            rainbow_interval_ms: default_rainbow_interval_ms(),
            rainbow_hue_step: default_rainbow_hue_step(),
            show_label: true,
        }
    }
}

/// Validation errors that [`Config::validate`] can return.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The `timezone` field is not a known IANA identifier.
    UnknownTimezone(String),
    /// `rainbow_interval_ms` is zero.
    ZeroRainbowInterval,
    /// `rainbow_hue_step` is outside 1..=359.
    InvalidHueStep(u16),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnknownTimezone(tz) => write!(f, "Unknown timezone: {tz}"),
            ValidationError::ZeroRainbowInterval => {
                write!(f, "rainbow_interval_ms must be greater than 0")
            }
            ValidationError::InvalidHueStep(step) => {
                write!(f, "rainbow_hue_step must be between 1 and 359, got {step}")
            }
        }
    }
}

impl Config {
    /// Platform-specific config directory.
    pub fn dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("hexclock"))
    }

    /// Full path to config file.
    pub fn path() -> Option<PathBuf> {
        Self::dir().map(|d| d.join("config.toml"))
    }

    /// Load config from disk, or return defaults if not found.
    pub fn load() -> Self {
        let (config, warnings) = Self::load_with_warnings();
        for w in &warnings {
            log::warn!("{w}");
        }
        config
    }

    /// Save config to an arbitrary path atomically (write to temp file, then rename).
    ///
    /// A header comment is prepended to warn that manual edits may be overwritten.
    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let serialized = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        let contents = format!("{CONFIG_HEADER}{serialized}");
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, &contents)?;
        match std::fs::rename(&tmp, path) {
            Ok(()) => Ok(()),
            Err(_) => {
                // Rename can fail across filesystems; fall back to direct write + cleanup
                let result = std::fs::write(path, &contents);
                let _ = std::fs::remove_file(&tmp);
                result
            }
        }
    }

    /// Load config from an arbitrary path, returning the config and any parse warnings.
    ///
    /// Returns `(defaults, [])` if the file doesn't exist.
    /// Returns `(defaults, [warning])` if the file exists but can't be parsed.
    pub fn load_from(path: &Path) -> (Self, Vec<String>) {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => (config, vec![]),
                Err(e) => {
                    let warning = format!(
                        "config parse error ({}), using defaults: {e}",
                        path.display()
                    );
                    (Self::default(), vec![warning])
                }
            },
            Err(_) => (Self::default(), vec![]),
        }
    }

    /// Load config from the default path, returning the config and any parse warnings.
    pub fn load_with_warnings() -> (Self, Vec<String>) {
        let Some(path) = Self::path() else {
            return (Self::default(), vec![]);
        };
        Self::load_from(&path)
    }

    /// Rainbow timing, with out-of-range values clamped to something usable.
    pub fn rainbow_settings(&self) -> RainbowSettings {
        RainbowSettings {
            interval: Duration::from_millis(self.rainbow_interval_ms.max(1)),
            hue_step: self.rainbow_hue_step.clamp(1, 359),
        }
    }

    /// Validate the entire config, collecting all errors.
    pub fn validate(&self) -> std::result::Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let tz = self.timezone.trim();
        if !tz.is_empty() && time::resolve_timezone(tz).is_err() {
            errors.push(ValidationError::UnknownTimezone(tz.to_string()));
        }

        if self.rainbow_interval_ms == 0 {
            errors.push(ValidationError::ZeroRainbowInterval);
        }

        if !(1..=359).contains(&self.rainbow_hue_step) {
            errors.push(ValidationError::InvalidHueStep(self.rainbow_hue_step));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
