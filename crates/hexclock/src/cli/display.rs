//! Terminal display sink — renders frames as a 24-bit ANSI status line.

use std::io::Write;

use hexclock_lib::scheduler::Frame;
use hexclock_lib::{DisplaySink, HexColor};

const RESET: &str = "\x1b[0m";
const CLEAR_LINE: &str = "\r\x1b[2K";

/// Width of the main color band (and of the label inside it).
const BAND_WIDTH: usize = 21;
const ACCENT_WIDTH: usize = 6;

fn bg(color: HexColor) -> String {
    let (r, g, b) = color.rgb();
    format!("\x1b[48;2;{r};{g};{b}m")
}

fn fg(color: HexColor) -> String {
    let (r, g, b) = color.rgb();
    format!("\x1b[38;2;{r};{g};{b}m")
}

/// Black or white, whichever reads better on `background`.
pub(super) fn label_color(background: HexColor) -> HexColor {
    let (r, g, b) = background.rgb();
    // ITU-R BT.601 luma
    let luma = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    if luma > 128_000 {
        HexColor::BLACK
    } else {
        HexColor::from_rgb(0xFF, 0xFF, 0xFF)
    }
}

pub(super) struct TerminalDisplay<W: Write> {
    out: W,
    show_label: bool,
    main: Option<HexColor>,
    accent: Option<HexColor>,
    status: String,
    write_failed: bool,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W, show_label: bool) -> Self {
        Self {
            out,
            show_label,
            main: None,
            accent: None,
            status: String::new(),
            write_failed: false,
        }
    }

    /// Text shown after the color swatches (mode, timezone, ...).
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        self.render();
    }

    /// Print a message on its own line, then redraw the status line below it.
    pub fn message(&mut self, text: &str) {
        let result = writeln!(self.out, "{CLEAR_LINE}{text}");
        self.check(result);
        self.render();
    }

    /// Restore default colors and leave the cursor on a fresh line.
    pub fn finish(&mut self) {
        let result = writeln!(self.out, "{RESET}").and_then(|_| self.out.flush());
        self.check(result);
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }

    fn render(&mut self) {
        let Some(main) = self.main else {
            return;
        };
        let label = if self.show_label {
            main.to_string()
        } else {
            String::new()
        };
        let accent = self.accent.unwrap_or(main);
        let line = format!(
            "{CLEAR_LINE}{}{}{label:^width$}{RESET} {}{:accent_width$}{RESET} {}",
            bg(main),
            fg(label_color(main)),
            bg(accent),
            "",
            self.status,
            width = BAND_WIDTH,
            accent_width = ACCENT_WIDTH,
        );
        let result = self
            .out
            .write_all(line.as_bytes())
            .and_then(|_| self.out.flush());
        self.check(result);
    }

    fn check(&mut self, result: std::io::Result<()>) {
        if let Err(e) = result
            && !self.write_failed
        {
            self.write_failed = true;
            log::warn!("[display] terminal write failed: {e}");
        }
    }
}

impl<W: Write> DisplaySink for TerminalDisplay<W> {
    fn show(&mut self, frame: &Frame) {
        self.main = Some(frame.color);
        self.render();
    }

    fn show_accent(&mut self, color: HexColor) {
        self.accent = Some(color);
        self.render();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(d: &TerminalDisplay<Vec<u8>>) -> String {
        String::from_utf8(d.output().clone()).unwrap()
    }

    #[test]
    fn nothing_rendered_before_first_frame() {
        let mut d = TerminalDisplay::new(Vec::new(), true);
        d.show_accent(HexColor::from_u32(0xFF0000));
        assert!(d.output().is_empty());
    }

    #[test]
    fn frame_sets_background_and_label() {
        let mut d = TerminalDisplay::new(Vec::new(), true);
        d.show(&Frame::manual(HexColor::from_u32(0x123456)));
        let out = rendered(&d);
        assert!(out.contains("\x1b[48;2;18;52;86m"));
        assert!(out.contains("#123456"));
    }

    #[test]
    fn label_can_be_hidden() {
        let mut d = TerminalDisplay::new(Vec::new(), false);
        d.show(&Frame::manual(HexColor::from_u32(0x123456)));
        assert!(!rendered(&d).contains("#123456"));
    }

    #[test]
    fn accent_is_drawn_separately() {
        let mut d = TerminalDisplay::new(Vec::new(), true);
        d.show(&Frame::manual(HexColor::from_u32(0x000000)));
        d.show_accent(HexColor::from_u32(0xFF0000));
        assert!(rendered(&d).contains("\x1b[48;2;255;0;0m"));
    }

    #[test]
    fn status_follows_swatches() {
        let mut d = TerminalDisplay::new(Vec::new(), true);
        d.show(&Frame::manual(HexColor::from_u32(0x000000)));
        d.set_status("inverted · UTC");
        assert!(rendered(&d).ends_with("inverted · UTC"));
    }

    #[test]
    fn finish_resets_colors() {
        let mut d = TerminalDisplay::new(Vec::new(), true);
        d.finish();
        assert_eq!(rendered(&d), "\x1b[0m\n");
    }

    #[test]
    fn label_contrast() {
        assert_eq!(label_color(HexColor::from_u32(0xFFFFFF)), HexColor::BLACK);
        assert_eq!(label_color(HexColor::from_u32(0xFFFF00)), HexColor::BLACK);
        assert_eq!(
            label_color(HexColor::from_u32(0x000000)),
            HexColor::from_rgb(0xFF, 0xFF, 0xFF)
        );
        assert_eq!(
            label_color(HexColor::from_u32(0x0000FF)),
            HexColor::from_rgb(0xFF, 0xFF, 0xFF)
        );
    }
}
