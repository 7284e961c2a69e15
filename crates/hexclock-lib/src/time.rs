//! Time source abstraction and timezone-aware field extraction.
//!
//! The scheduler never calls `Utc::now()` directly; it asks a [`TimeSource`]
//! so tests can drive it with [`ManualTimeSource`].

use std::cell::Cell;

use chrono::{DateTime, Datelike, Local, TimeDelta, Timelike, Utc};
use chrono_tz::Tz;

use crate::color::HexColor;
use crate::error::{HexclockError, Result};

/// Timezone used when the host's own zone cannot be determined.
pub const FALLBACK_TIMEZONE: &str = "UTC";

/// Source of the current wall-clock instant.
pub trait TimeSource {
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Calendar and clock fields of one instant in one timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeFields {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub day: u32,
    /// 1-based.
    pub month: u32,
    pub year: i32,
}

impl TimeFields {
    fn from_datetime<T: Datelike + Timelike>(dt: &T) -> Self {
        TimeFields {
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second(),
            day: dt.day(),
            month: dt.month(),
            year: dt.year(),
        }
    }
}

/// Resolve an IANA timezone identifier.
pub fn resolve_timezone(id: &str) -> Result<Tz> {
    id.trim()
        .parse::<Tz>()
        .map_err(|_| HexclockError::Timezone(format!("unsupported timezone identifier: {id}")))
}

/// The host's IANA timezone, or [`FALLBACK_TIMEZONE`] if it can't be determined.
pub fn host_timezone() -> String {
    match iana_time_zone::get_timezone() {
        Ok(tz) if resolve_timezone(&tz).is_ok() => tz,
        Ok(tz) => {
            log::warn!("host timezone '{tz}' is not in the timezone database, using {FALLBACK_TIMEZONE}");
            FALLBACK_TIMEZONE.to_string()
        }
        Err(e) => {
            log::warn!("could not determine host timezone ({e}), using {FALLBACK_TIMEZONE}");
            FALLBACK_TIMEZONE.to_string()
        }
    }
}

/// Extract fields for `now` in `timezone`.
///
/// An unknown timezone falls back to the host's local time for this call
/// only; the condition is logged and never returned as an error.
pub fn fields_in(now: DateTime<Utc>, timezone: &str) -> TimeFields {
    match resolve_timezone(timezone) {
        Ok(tz) => TimeFields::from_datetime(&now.with_timezone(&tz)),
        Err(e) => {
            log::warn!("{e}; falling back to local time");
            TimeFields::from_datetime(&now.with_timezone(&Local))
        }
    }
}

/// Hour formatters can render midnight as `24`; the clock always shows `00`.
pub fn normalize_hour(hour: u32) -> u32 {
    if hour == 24 { 0 } else { hour }
}

/// Raw time hex: `#HHMMSS`, 24-hour.
pub fn raw_time_hex(fields: &TimeFields) -> HexColor {
    HexColor::from_decimal_pairs(normalize_hour(fields.hour), fields.minute, fields.second)
}

/// Raw date hex: `#DDMMYY`.
pub fn raw_date_hex(fields: &TimeFields) -> HexColor {
    HexColor::from_decimal_pairs(fields.day, fields.month, fields.year.rem_euclid(100) as u32)
}

/// Delay until the next wall-clock second boundary after `now`.
///
/// Always in `1..=1000` ms; an instant exactly on a boundary waits a full second.
pub fn delay_to_next_second(now: DateTime<Utc>) -> TimeDelta {
    let millis = now.timestamp_subsec_millis().min(999);
    TimeDelta::milliseconds(i64::from(1000 - millis))
}

/// One entry of the supported-timezone catalogue.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TimezoneEntry {
    /// IANA identifier, e.g. `America/New_York`.
    pub id: String,
    /// Human label, e.g. `America/New York`.
    pub label: String,
}

/// Every timezone the clock can display.
pub fn timezones() -> Vec<TimezoneEntry> {
    chrono_tz::TZ_VARIANTS
        .iter()
        .map(|tz| TimezoneEntry {
            id: tz.name().to_string(),
            label: tz.name().replace('_', " "),
        })
        .collect()
}

// ── Test stub ──

/// Time source that only moves when told to.
#[derive(Debug)]
pub struct ManualTimeSource {
    now: Cell<DateTime<Utc>>,
}

impl ManualTimeSource {
    pub fn new(start: DateTime<Utc>) -> Self {
        ManualTimeSource {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: TimeDelta) {
        self.now.set(self.now.get() + by);
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}
