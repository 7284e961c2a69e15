//! Hex clock state machine — mode, date/time, manual override and rainbow, decoupled from I/O.
//!
//! [`HexClock`] owns the [`ClockState`], the [`ClockScheduler`] and the
//! [`RainbowOverlay`]. Front-ends translate user input into its operations
//! and drive it from a single loop: sleep until [`HexClock::next_deadline`]
//! or the next input, then call [`HexClock::run_due`].

use chrono::{DateTime, Utc};

use crate::color::HexColor;
use crate::config::Config;
use crate::error::Result;
use crate::rainbow::{RainbowOverlay, RainbowSettings};
use crate::scheduler::{ClockScheduler, Frame};
use crate::time::{self, TimeSource};
use crate::transform::DisplayMode;

/// Where clock output goes.
pub trait DisplaySink {
    /// Background and label.
    fn show(&mut self, frame: &Frame);
    /// Secondary element that follows the clock unless the rainbow is active.
    fn show_accent(&mut self, color: HexColor);
}

impl<D: DisplaySink + ?Sized> DisplaySink for &mut D {
    fn show(&mut self, frame: &Frame) {
        (**self).show(frame);
    }

    fn show_accent(&mut self, color: HexColor) {
        (**self).show_accent(color);
    }
}

/// High-level state, derived from [`ClockState`] and the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockPhase {
    /// Time frames every second.
    Ticking,
    /// Frozen on a date frame.
    Date,
    /// Frozen on a user-supplied color.
    Manual,
    /// Not started yet.
    Idle,
}

/// Mutable clock configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockState {
    timezone: String,
    host_timezone: String,
    date_mode: bool,
    mode: DisplayMode,
    manual: Option<HexColor>,
    last_color: Option<HexColor>,
}

impl ClockState {
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    pub fn host_timezone(&self) -> &str {
        &self.host_timezone
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// The user-supplied color, while a manual override is in effect.
    pub fn manual_override(&self) -> Option<HexColor> {
        self.manual
    }
}

/// Startup settings for [`HexClock`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClockOptions {
    pub timezone: String,
    /// Timezone restored by [`HexClock::reset_timezone`], and the calendar
    /// date mode shows.
    pub host_timezone: String,
    pub mode: DisplayMode,
    pub start_in_date_mode: bool,
    pub rainbow: RainbowSettings,
}

impl ClockOptions {
    /// Options for the given host timezone with everything else defaulted.
    pub fn with_host_timezone(host_timezone: impl Into<String>) -> Self {
        let host_timezone = host_timezone.into();
        ClockOptions {
            timezone: host_timezone.clone(),
            host_timezone,
            mode: DisplayMode::Normal,
            start_in_date_mode: false,
            rainbow: RainbowSettings::default(),
        }
    }

    /// Options from a loaded config. An empty `timezone` means the host's.
    pub fn from_config(config: &Config, host_timezone: impl Into<String>) -> Self {
        let mut options = Self::with_host_timezone(host_timezone);
        if !config.timezone.trim().is_empty() {
            options.timezone = config.timezone.trim().to_string();
        }
        options.mode = config.mode;
        options.start_in_date_mode = config.start_in_date_mode;
        options.rainbow = config.rainbow_settings();
        options
    }
}

pub struct HexClock<S, D> {
    state: ClockState,
    scheduler: ClockScheduler<S>,
    rainbow: RainbowOverlay,
    display: D,
    start_in_date_mode: bool,
}

/// Push a frame to the display, keeping the accent in sync unless the rainbow owns it.
fn emit<D: DisplaySink>(display: &mut D, state: &mut ClockState, rainbow_active: bool, frame: Frame) {
    display.show(&frame);
    if !rainbow_active {
        display.show_accent(frame.color);
    }
    state.last_color = Some(frame.color);
}

impl<S: TimeSource, D: DisplaySink> HexClock<S, D> {
    /// Build an idle clock. Nothing is emitted until [`start`](Self::start).
    pub fn new(source: S, display: D, options: ClockOptions) -> Self {
        if let Err(e) = time::resolve_timezone(&options.timezone) {
            log::warn!("{e}; local time will be shown until the timezone is changed");
        }
        HexClock {
            state: ClockState {
                timezone: options.timezone,
                host_timezone: options.host_timezone,
                date_mode: false,
                mode: options.mode,
                manual: None,
                last_color: None,
            },
            scheduler: ClockScheduler::new(source),
            rainbow: RainbowOverlay::new(options.rainbow),
            display,
            start_in_date_mode: options.start_in_date_mode,
        }
    }

    /// Emit the first frame and begin ticking (or show the date, if configured).
    pub fn start(&mut self) {
        if self.start_in_date_mode {
            self.set_date_mode();
        } else {
            self.restart();
        }
    }

    pub fn state(&self) -> &ClockState {
        &self.state
    }

    pub fn phase(&self) -> ClockPhase {
        if self.state.manual.is_some() {
            ClockPhase::Manual
        } else if self.state.date_mode {
            ClockPhase::Date
        } else if self.scheduler.is_running() {
            ClockPhase::Ticking
        } else {
            ClockPhase::Idle
        }
    }

    pub fn is_rainbow_active(&self) -> bool {
        self.rainbow.is_active()
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.scheduler.now()
    }

    /// Change the display mode. Date mode re-renders its single frame;
    /// otherwise (including after a manual override) ticking restarts.
    pub fn set_mode(&mut self, mode: DisplayMode) {
        log::info!("[mode] {mode}");
        self.state.mode = mode;
        if self.state.date_mode {
            self.show_date_frame();
        } else {
            self.restart();
        }
    }

    /// Switch timezone and restart ticking.
    ///
    /// Unknown identifiers are accepted; each tick then falls back to local time.
    pub fn set_timezone(&mut self, timezone: &str) {
        let timezone = timezone.trim();
        if let Err(e) = time::resolve_timezone(timezone) {
            log::warn!("{e}; ticks will fall back to local time");
        }
        log::info!("[timezone] {timezone}");
        self.state.timezone = timezone.to_string();
        self.restart();
    }

    /// Go back to the host timezone and restart ticking.
    pub fn reset_timezone(&mut self) {
        let host = self.state.host_timezone.clone();
        self.set_timezone(&host);
    }

    /// Stop ticking and show today's date on the host calendar.
    pub fn set_date_mode(&mut self) {
        self.state.date_mode = true;
        self.state.manual = None;
        self.show_date_frame();
    }

    /// Freeze the display on a user-supplied color.
    ///
    /// Invalid input is rejected and leaves the clock untouched.
    pub fn set_manual_hex(&mut self, input: &str) -> Result<HexColor> {
        let color = HexColor::parse(input)?;
        self.scheduler.stop();
        self.state.date_mode = false;
        self.state.manual = Some(color);
        log::info!("[manual] {color}");
        emit(
            &mut self.display,
            &mut self.state,
            self.rainbow.is_active(),
            Frame::manual(color),
        );
        Ok(color)
    }

    /// Back to a normal-mode ticking clock in the current timezone.
    pub fn reset(&mut self) {
        self.state.mode = DisplayMode::Normal;
        self.restart();
    }

    /// Start hue cycling on the accent element. The accent keeps its color
    /// until the first step.
    pub fn rainbow_enter(&mut self) {
        let now = self.scheduler.now();
        self.rainbow.enter(now);
    }

    /// Stop hue cycling and restore the accent to the last displayed color.
    pub fn rainbow_exit(&mut self) {
        if self.rainbow.exit()
            && let Some(color) = self.state.last_color
        {
            self.display.show_accent(color);
        }
    }

    /// Earliest instant at which [`run_due`](Self::run_due) has work to do.
    pub fn next_deadline(&self) -> Option<DateTime<Utc>> {
        let clock = self.scheduler.next_deadline().map(|(_, due)| due);
        let rainbow = self.rainbow.next_deadline().map(|(_, due)| due);
        match (clock, rainbow) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fire every timer that is due now. Returns how many fired.
    pub fn run_due(&mut self) -> usize {
        let mut fired = 0;
        let now = self.scheduler.now();

        if let Some((id, due)) = self.scheduler.next_deadline()
            && due <= now
        {
            let timezone = self.state.timezone.clone();
            let mode = self.state.mode;
            let rainbow_active = self.rainbow.is_active();
            let display = &mut self.display;
            let state = &mut self.state;
            if self
                .scheduler
                .fire(id, &timezone, mode, |frame| emit(display, state, rainbow_active, frame))
                .is_some()
            {
                fired += 1;
            }
        }

        if let Some((id, _)) = self.rainbow.next_deadline()
            && let Some(color) = self.rainbow.fire(id, now)
        {
            self.display.show_accent(color);
            fired += 1;
        }

        fired
    }

    fn restart(&mut self) {
        self.state.date_mode = false;
        self.state.manual = None;
        let timezone = self.state.timezone.clone();
        let mode = self.state.mode;
        let rainbow_active = self.rainbow.is_active();
        let display = &mut self.display;
        let state = &mut self.state;
        self.scheduler
            .start(&timezone, mode, |frame| emit(display, state, rainbow_active, frame));
    }

    fn show_date_frame(&mut self) {
        // The date follows the host calendar, not the ticking timezone.
        let timezone = self.state.host_timezone.clone();
        let mode = self.state.mode;
        let rainbow_active = self.rainbow.is_active();
        let display = &mut self.display;
        let state = &mut self.state;
        self.scheduler
            .show_date(&timezone, mode, |frame| emit(display, state, rainbow_active, frame));
    }
}
