//! Line commands typed while `run` is active, and the stdin reader that feeds them.

use std::io::BufRead;
use std::sync::mpsc::Sender;

use super::DisplayMode;

/// One user action, already separated from the text it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum ClockCommand {
    /// `h`: normal mode, ticking in the current timezone.
    Reset,
    /// `j`
    DateMode,
    /// `k` inverted, `l` reversed, `n` normal.
    Mode(DisplayMode),
    /// `tz <ID>`
    Timezone(String),
    /// `tz` with no argument.
    ResetTimezone,
    /// `#RRGGBB` or `set <hex>`
    ManualHex(String),
    RainbowOn,
    RainbowOff,
    Help,
    Quit,
}

pub(super) const HELP: &str = "\
Commands:
  h              reset (normal mode, ticking)
  j              date mode
  k / l / n      inverted / reversed / normal
  tz <ID>        set timezone (tz alone resets to host)
  #RRGGBB        show a fixed color (also: set <hex>)
  rainbow [off]  start / stop the rainbow accent
  ?              this help
  q              quit";

/// Parse one input line. Blank lines are `Ok(None)`.
pub(super) fn parse_command(line: &str) -> Result<Option<ClockCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if line.starts_with('#') {
        return Ok(Some(ClockCommand::ManualHex(line.to_string())));
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };

    let cmd = match (word.to_ascii_lowercase().as_str(), rest) {
        ("h" | "reset", "") => ClockCommand::Reset,
        ("j" | "date", "") => ClockCommand::DateMode,
        ("k" | "invert" | "inverted", "") => ClockCommand::Mode(DisplayMode::Inverted),
        ("l" | "reverse" | "reversed", "") => ClockCommand::Mode(DisplayMode::Reversed),
        ("n" | "normal", "") => ClockCommand::Mode(DisplayMode::Normal),
        ("tz" | "timezone", "") => ClockCommand::ResetTimezone,
        ("tz" | "timezone", tz) => ClockCommand::Timezone(tz.to_string()),
        ("set", "") => return Err("usage: set <hex>".into()),
        ("set", hex) => ClockCommand::ManualHex(hex.to_string()),
        ("rainbow", "" | "on") => ClockCommand::RainbowOn,
        ("rainbow", "off") => ClockCommand::RainbowOff,
        ("?" | "help", _) => ClockCommand::Help,
        ("q" | "quit" | "exit", _) => ClockCommand::Quit,
        _ => return Err(format!("unknown command: {line} (type ? for help)")),
    };
    Ok(Some(cmd))
}

/// Read stdin on a background thread, forwarding parsed commands.
///
/// Parse errors are forwarded too so the loop can print them between frames.
/// The thread ends when stdin closes or the receiver is dropped.
pub(super) fn spawn_stdin_reader(tx: Sender<Result<ClockCommand, String>>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let parsed = match parse_command(&line) {
                Ok(Some(cmd)) => Ok(cmd),
                Ok(None) => continue,
                Err(e) => Err(e),
            };
            if tx.send(parsed).is_err() {
                break;
            }
        }
        log::debug!("[input] stdin closed");
    });
}
