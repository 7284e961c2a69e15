//! `run` subcommand — interactive clock in the terminal.

use std::io::Write;
use std::path::Path;
use std::sync::atomic::Ordering;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use hexclock_lib::clock::ClockPhase;
use hexclock_lib::time::{SystemTimeSource, TimeSource};

use super::display::TerminalDisplay;
use super::input::{self, ClockCommand, HELP};
use super::{ClockArgs, HexClock, RUNNING, Result, time};

/// Upper bound on a single wait, so Ctrl+C is noticed promptly.
const IDLE_POLL: Duration = Duration::from_millis(250);

type TermClock<S, W> = HexClock<S, TerminalDisplay<W>>;

/// Apply one user command. Returns `false` when the user asked to quit.
fn apply_command<S: TimeSource, W: Write>(clock: &mut TermClock<S, W>, cmd: ClockCommand) -> bool {
    match cmd {
        ClockCommand::Reset => clock.reset(),
        ClockCommand::DateMode => clock.set_date_mode(),
        ClockCommand::Mode(mode) => clock.set_mode(mode),
        ClockCommand::Timezone(tz) => {
            if let Err(e) = time::resolve_timezone(&tz) {
                clock
                    .display_mut()
                    .message(&format!("{e} (showing local time)"));
            }
            clock.set_timezone(&tz);
        }
        ClockCommand::ResetTimezone => clock.reset_timezone(),
        ClockCommand::ManualHex(hex) => {
            if let Err(e) = clock.set_manual_hex(&hex) {
                clock.display_mut().message(&e.to_string());
            }
        }
        ClockCommand::RainbowOn => clock.rainbow_enter(),
        ClockCommand::RainbowOff => clock.rainbow_exit(),
        ClockCommand::Help => clock.display_mut().message(HELP),
        ClockCommand::Quit => return false,
    }
    refresh_status(clock);
    true
}

fn status_line<S: TimeSource, W: Write>(clock: &TermClock<S, W>) -> String {
    let state = clock.state();
    let mut status = match clock.phase() {
        ClockPhase::Ticking => format!("time · {} · {}", state.mode(), state.timezone()),
        // Dates are read from the host calendar.
        ClockPhase::Date => format!("date · {} · {}", state.mode(), state.host_timezone()),
        ClockPhase::Manual => match state.manual_override() {
            Some(color) => format!("manual · {color}"),
            None => "manual".to_string(),
        },
        ClockPhase::Idle => "idle".to_string(),
    };
    if clock.is_rainbow_active() {
        status.push_str(" · rainbow");
    }
    status
}

fn refresh_status<S: TimeSource, W: Write>(clock: &mut TermClock<S, W>) {
    let status = status_line(clock);
    clock.display_mut().set_status(status);
}

/// How long to wait before the next timer is due, capped at [`IDLE_POLL`].
fn wait_time<S: TimeSource, W: Write>(clock: &TermClock<S, W>) -> Duration {
    match clock.next_deadline() {
        Some(due) => (due - clock.now())
            .to_std()
            .unwrap_or(Duration::ZERO)
            .min(IDLE_POLL),
        None => IDLE_POLL,
    }
}

/// Main loop: wait for input or the next deadline, then fire due timers.
fn run_loop<S: TimeSource, W: Write>(
    clock: &mut TermClock<S, W>,
    commands: &Receiver<std::result::Result<ClockCommand, String>>,
) {
    let mut stdin_open = true;

    while RUNNING.load(Ordering::SeqCst) {
        let wait = wait_time(clock);

        if stdin_open {
            match commands.recv_timeout(wait) {
                Ok(Ok(cmd)) => {
                    if !apply_command(clock, cmd) {
                        break;
                    }
                }
                Ok(Err(msg)) => clock.display_mut().message(&msg),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    log::debug!("[input] no more commands, clock keeps running");
                    stdin_open = false;
                }
            }
        } else {
            std::thread::sleep(wait);
        }

        clock.run_due();
    }
}

pub(super) fn cmd_run(args: &ClockArgs, no_label: bool, config_path: Option<&Path>) -> Result<()> {
    let config = super::load_config(config_path);
    let options = args.options(&config)?;
    let show_label = config.show_label && !no_label;

    // Banner
    println!("hexclock — the time as a color (#HHMMSS).");
    println!("  Timezone: {}", options.timezone);
    println!("  Mode:     {}", options.mode);
    println!();
    println!("{HELP}");
    println!();

    let (tx, rx) = mpsc::channel();
    input::spawn_stdin_reader(tx);

    let display = TerminalDisplay::new(std::io::stdout(), show_label);
    let mut clock = HexClock::new(SystemTimeSource, display, options);
    clock.start();
    refresh_status(&mut clock);

    run_loop(&mut clock, &rx);

    // Cleanup
    clock.display_mut().finish();
    Ok(())
}
