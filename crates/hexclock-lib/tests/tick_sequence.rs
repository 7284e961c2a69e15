//! Integration tests: simulated clock runs through the public API.
//!
//! A manual time source is stepped to each armed deadline the way the host
//! loop would, and a recording sink counts what reached the display.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use hexclock_lib::time::ManualTimeSource;
use hexclock_lib::{
    ClockOptions, ClockPhase, DisplayMode, DisplaySink, Frame, FrameKind, HexClock, HexColor,
};

#[derive(Default)]
struct Recorder {
    frames: Vec<Frame>,
    accents: Vec<HexColor>,
}

impl DisplaySink for Recorder {
    fn show(&mut self, frame: &Frame) {
        self.frames.push(*frame);
    }

    fn show_accent(&mut self, color: HexColor) {
        self.accents.push(color);
    }
}

fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 23, 59, 55).unwrap() + TimeDelta::milliseconds(400)
}

/// Drive the clock like a host loop: jump to each deadline until `until`.
fn run_until(clock: &mut HexClock<&ManualTimeSource, Recorder>, src: &ManualTimeSource, until: DateTime<Utc>) {
    while let Some(due) = clock.next_deadline() {
        if due > until {
            break;
        }
        src.set(due);
        assert!(clock.run_due() > 0, "deadline {due} produced no work");
    }
    src.set(until);
}

fn new_clock(src: &ManualTimeSource) -> HexClock<&ManualTimeSource, Recorder> {
    HexClock::new(src, Recorder::default(), ClockOptions::with_host_timezone("UTC"))
}

// ── Test: one frame per second, aligned to boundaries ──

#[test]
fn ten_seconds_emit_eleven_frames() {
    let src = ManualTimeSource::new(start_time());
    let mut clock = new_clock(&src);
    clock.start();
    run_until(&mut clock, &src, start_time() + TimeDelta::seconds(10));

    // initial frame + one per boundary crossed
    assert_eq!(clock.display().frames.len(), 11);
}

#[test]
fn ticks_cross_midnight_to_black() {
    let src = ManualTimeSource::new(start_time());
    let mut clock = new_clock(&src);
    clock.start();
    run_until(&mut clock, &src, start_time() + TimeDelta::seconds(5));

    let colors: Vec<String> = clock
        .display()
        .frames
        .iter()
        .map(|f| f.color.to_string())
        .collect();
    assert_eq!(
        colors,
        ["#235955", "#235956", "#235957", "#235958", "#235959", "#000000"]
    );
}

// ── Test: double start never duplicates ticking ──

#[test]
fn starting_twice_keeps_single_timer() {
    let src = ManualTimeSource::new(start_time());
    let mut clock = new_clock(&src);
    clock.start();
    clock.start();
    let after_starts = clock.display().frames.len();
    assert_eq!(after_starts, 2);

    run_until(&mut clock, &src, start_time() + TimeDelta::seconds(10));
    assert_eq!(clock.display().frames.len() - after_starts, 10);
}

#[test]
fn rapid_reconfiguration_keeps_single_timer() {
    let src = ManualTimeSource::new(start_time());
    let mut clock = new_clock(&src);
    clock.start();
    clock.set_timezone("Europe/London");
    clock.set_mode(DisplayMode::Inverted);
    clock.set_timezone("UTC");
    clock.set_mode(DisplayMode::Normal);
    let after = clock.display().frames.len();

    run_until(&mut clock, &src, start_time() + TimeDelta::seconds(3));
    assert_eq!(clock.display().frames.len() - after, 3);
}

// ── Test: manual override stops emission until reset ──

#[test]
fn manual_override_stops_until_reset() {
    let src = ManualTimeSource::new(start_time());
    let mut clock = new_clock(&src);
    clock.start();
    run_until(&mut clock, &src, start_time() + TimeDelta::seconds(2));

    clock.set_manual_hex("#336699").unwrap();
    let frozen = clock.display().frames.len();
    run_until(&mut clock, &src, start_time() + TimeDelta::seconds(30));
    assert_eq!(clock.display().frames.len(), frozen);
    assert_eq!(clock.phase(), ClockPhase::Manual);

    clock.reset();
    assert_eq!(clock.phase(), ClockPhase::Ticking);
    run_until(&mut clock, &src, start_time() + TimeDelta::seconds(33));
    // reset frame + 3 ticks
    assert_eq!(clock.display().frames.len(), frozen + 4);
}

// ── Test: date mode is one-shot ──

#[test]
fn date_mode_emits_once() {
    let src = ManualTimeSource::new(start_time());
    let mut clock = new_clock(&src);
    clock.start();
    clock.set_date_mode();
    let count = clock.display().frames.len();
    assert_eq!(clock.display().frames.last().unwrap().kind, FrameKind::Date);
    assert_eq!(clock.display().frames.last().unwrap().color.to_string(), "#161026");

    run_until(&mut clock, &src, start_time() + TimeDelta::hours(1));
    assert_eq!(clock.display().frames.len(), count);
}

#[test]
fn date_mode_uses_host_day_not_ticking_zone() {
    let src = ManualTimeSource::new(start_time());
    // Host is already on the 17th; the clock ticks in UTC.
    let mut options = ClockOptions::with_host_timezone("Pacific/Kiritimati");
    options.timezone = "UTC".into();
    let mut clock = HexClock::new(&src, Recorder::default(), options);
    clock.start();
    assert_eq!(clock.display().frames.last().unwrap().color.to_string(), "#235955");

    clock.set_date_mode();
    assert_eq!(clock.display().frames.last().unwrap().color.to_string(), "#171026");
}

// ── Test: rainbow runs beside the clock without disturbing it ──

#[test]
fn rainbow_does_not_change_tick_count() {
    let src = ManualTimeSource::new(start_time());
    let mut clock = new_clock(&src);
    clock.start();
    clock.rainbow_enter();
    run_until(&mut clock, &src, start_time() + TimeDelta::seconds(3));
    clock.rainbow_exit();

    assert_eq!(clock.display().frames.len(), 4);
    // One accent for the first frame, ~300 hue steps, one restore.
    assert!(clock.display().accents.len() > 250);
    let last_frame = *clock.display().frames.last().unwrap();
    assert_eq!(clock.display().accents.last(), Some(&last_frame.color));
}

#[test]
fn invalid_timezone_falls_back_and_keeps_ticking() {
    let src = ManualTimeSource::new(start_time());
    let mut clock = new_clock(&src);
    clock.start();
    clock.set_timezone("Invalid/Zone");
    let after = clock.display().frames.len();
    run_until(&mut clock, &src, start_time() + TimeDelta::seconds(4));
    assert_eq!(clock.display().frames.len() - after, 4);
    assert_eq!(clock.phase(), ClockPhase::Ticking);
}
