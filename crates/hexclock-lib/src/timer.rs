//! Single-slot cancellable timer driven by an external loop.
//!
//! A [`Timer`] holds at most one armed deadline. Arming always replaces the
//! previous deadline, and every arm gets a fresh [`TimerId`] so a firing that
//! was queued before a cancel can be recognised as stale and dropped.

use chrono::{DateTime, Utc};

/// Identity of one armed deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy)]
struct Armed {
    id: TimerId,
    due: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct Timer {
    generation: u64,
    armed: Option<Armed>,
}

impl Timer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm for `due`, cancelling whatever was armed before.
    pub fn arm(&mut self, due: DateTime<Utc>) -> TimerId {
        self.generation += 1;
        let id = TimerId(self.generation);
        self.armed = Some(Armed { id, due });
        id
    }

    /// Cancel the armed deadline. Returns `false` if nothing was armed.
    pub fn cancel(&mut self) -> bool {
        self.armed.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// The armed deadline and its id.
    pub fn deadline(&self) -> Option<(TimerId, DateTime<Utc>)> {
        self.armed.map(|a| (a.id, a.due))
    }

    /// Disarm if `id` is the armed timer and it is due at `now`.
    ///
    /// Returns the due instant on success. Stale ids and early calls leave
    /// the timer untouched and return `None`.
    pub fn take_due(&mut self, id: TimerId, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.armed {
            Some(a) if a.id == id && a.due <= now => {
                self.armed = None;
                Some(a.due)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    #[test]
    fn new_timer_is_idle() {
        let timer = Timer::new();
        assert!(!timer.is_armed());
        assert!(timer.deadline().is_none());
    }

    #[test]
    fn arm_replaces_previous() {
        let mut timer = Timer::new();
        let a = timer.arm(t0());
        let b = timer.arm(t0() + TimeDelta::seconds(1));
        assert_ne!(a, b);
        assert_eq!(timer.deadline(), Some((b, t0() + TimeDelta::seconds(1))));
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut timer = Timer::new();
        assert!(!timer.cancel());
        timer.arm(t0());
        assert!(timer.cancel());
        assert!(!timer.cancel());
        assert!(!timer.is_armed());
    }

    #[test]
    fn take_due_requires_current_id() {
        let mut timer = Timer::new();
        let stale = timer.arm(t0());
        let current = timer.arm(t0());
        assert!(timer.take_due(stale, t0()).is_none());
        assert!(timer.is_armed());
        assert_eq!(timer.take_due(current, t0()), Some(t0()));
        assert!(!timer.is_armed());
    }

    #[test]
    fn take_due_ignores_early_calls() {
        let mut timer = Timer::new();
        let id = timer.arm(t0() + TimeDelta::milliseconds(500));
        assert!(timer.take_due(id, t0()).is_none());
        assert!(timer.is_armed());
    }

    #[test]
    fn take_due_after_cancel_is_none() {
        let mut timer = Timer::new();
        let id = timer.arm(t0());
        timer.cancel();
        assert!(timer.take_due(id, t0()).is_none());
    }
}
