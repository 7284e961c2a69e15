//! Rainbow overlay — hue cycling on the accent element while hovered.
//!
//! Runs on its own [`Timer`], fully separate from the clock tick.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::color::{HexColor, hsl_to_rgb};
use crate::timer::{Timer, TimerId};

/// Hue step timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RainbowSettings {
    /// Time between hue steps.
    pub interval: Duration,
    /// Degrees added per step.
    pub hue_step: u16,
}

impl Default for RainbowSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(10),
            hue_step: 1,
        }
    }
}

#[derive(Debug)]
pub struct RainbowOverlay {
    settings: RainbowSettings,
    hue: u16,
    active: bool,
    timer: Timer,
}

impl RainbowOverlay {
    pub fn new(settings: RainbowSettings) -> Self {
        Self {
            settings,
            hue: 0,
            active: false,
            timer: Timer::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    #[cfg(test)]
    pub fn hue(&self) -> u16 {
        self.hue
    }

    /// Start cycling from hue 0. Returns `false` if already active.
    pub fn enter(&mut self, now: DateTime<Utc>) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        self.hue = 0;
        self.timer.arm(now + self.step_delta());
        true
    }

    /// Stop cycling. Returns `false` if it wasn't active.
    pub fn exit(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.timer.cancel();
        true
    }

    /// Advance one hue step if `id` is due, returning the accent color to show.
    pub fn fire(&mut self, id: TimerId, now: DateTime<Utc>) -> Option<HexColor> {
        let due = self.timer.take_due(id, now)?;
        self.hue = (self.hue + self.settings.hue_step % 360) % 360;

        // Stay on the fixed grid unless the loop fell a whole step behind.
        let step = self.step_delta();
        let next = if due + step > now { due + step } else { now + step };
        self.timer.arm(next);

        Some(self.color())
    }

    /// Current hue as `hsl(hue, 100%, 50%)`.
    fn color(&self) -> HexColor {
        hsl_to_rgb(self.hue, 1.0, 0.5)
    }

    pub fn next_deadline(&self) -> Option<(TimerId, DateTime<Utc>)> {
        self.timer.deadline()
    }

    fn step_delta(&self) -> TimeDelta {
        TimeDelta::from_std(self.settings.interval)
            .unwrap_or(TimeDelta::milliseconds(10))
            .max(TimeDelta::milliseconds(1))
    }
}
