//! Clock scheduler — one self-correcting repeating tick aligned to second boundaries.
//!
//! The scheduler does not sleep. It arms a deadline on its [`Timer`] and the
//! host loop calls [`ClockScheduler::fire`] once that deadline passes. Every
//! firing computes the next delay from the current millisecond-of-second, so
//! a late wake-up never accumulates into drift.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::color::HexColor;
use crate::time::{self, TimeSource};
use crate::timer::{Timer, TimerId};
use crate::transform::{DisplayMode, transform};

/// What a frame was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameKind {
    Time,
    Date,
    Manual,
}

/// One color pushed to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Color to show (after the display mode was applied).
    pub color: HexColor,
    /// Color before the display mode was applied.
    pub raw: HexColor,
    pub kind: FrameKind,
}

impl Frame {
    pub fn manual(color: HexColor) -> Self {
        Frame {
            color,
            raw: color,
            kind: FrameKind::Manual,
        }
    }
}

/// Time-of-day frame for `now` in `timezone`.
pub fn time_frame(now: DateTime<Utc>, timezone: &str, mode: DisplayMode) -> Frame {
    let raw = time::raw_time_hex(&time::fields_in(now, timezone));
    Frame {
        color: transform(raw, mode),
        raw,
        kind: FrameKind::Time,
    }
}

/// Calendar-date frame for `now` in `timezone` (the host's, for the clock).
pub fn date_frame(now: DateTime<Utc>, timezone: &str, mode: DisplayMode) -> Frame {
    let raw = time::raw_date_hex(&time::fields_in(now, timezone));
    Frame {
        color: transform(raw, mode),
        raw,
        kind: FrameKind::Date,
    }
}

pub struct ClockScheduler<S> {
    source: S,
    timer: Timer,
}

impl<S: TimeSource> ClockScheduler<S> {
    pub fn new(source: S) -> Self {
        ClockScheduler {
            source,
            timer: Timer::new(),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.source.now()
    }

    #[cfg(test)]
    pub(crate) fn source(&self) -> &S {
        &self.source
    }

    /// Cancel any running tick, emit one time frame now, and arm the next tick.
    pub fn start(&mut self, timezone: &str, mode: DisplayMode, emit: impl FnOnce(Frame)) -> TimerId {
        if self.timer.cancel() {
            log::debug!("[clock] cancelled previous tick before restart");
        }
        self.tick(timezone, mode, emit)
    }

    /// Cancel the pending tick, if any. Returns whether one was pending.
    pub fn stop(&mut self) -> bool {
        let stopped = self.timer.cancel();
        if stopped {
            log::debug!("[clock] stopped");
        }
        stopped
    }

    /// Stop ticking and emit a single date frame. Nothing is re-armed.
    pub fn show_date(&mut self, timezone: &str, mode: DisplayMode, emit: impl FnOnce(Frame)) {
        self.stop();
        emit(date_frame(self.source.now(), timezone, mode));
    }

    /// Handle an expired deadline.
    ///
    /// Stale or early ids are ignored and return `None`. Otherwise the frame
    /// is emitted before the next tick is armed, and the new id is returned.
    pub fn fire(
        &mut self,
        id: TimerId,
        timezone: &str,
        mode: DisplayMode,
        emit: impl FnOnce(Frame),
    ) -> Option<TimerId> {
        let now = self.source.now();
        self.timer.take_due(id, now)?;
        Some(self.tick(timezone, mode, emit))
    }

    /// The armed tick, if the clock is running.
    pub fn next_deadline(&self) -> Option<(TimerId, DateTime<Utc>)> {
        self.timer.deadline()
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_armed()
    }

    fn tick(&mut self, timezone: &str, mode: DisplayMode, emit: impl FnOnce(Frame)) -> TimerId {
        emit(time_frame(self.source.now(), timezone, mode));
        // Re-read the clock: emitting may have taken a measurable slice of the second.
        let now = self.source.now();
        let due = now + time::delay_to_next_second(now);
        log::trace!("[clock] next tick at {due}");
        self.timer.arm(due)
    }
}
