//! Display modes and the pure raw-hex → displayed-hex transform.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::HexColor;
use crate::error::HexclockError;

/// How a raw time/date hex is turned into the displayed color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Normal,
    /// Each RGB component becomes `255 - value`.
    Inverted,
    /// The six hex characters are reversed (characters, not byte pairs).
    Reversed,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 3] = [
        DisplayMode::Normal,
        DisplayMode::Inverted,
        DisplayMode::Reversed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DisplayMode::Normal => "normal",
            DisplayMode::Inverted => "inverted",
            DisplayMode::Reversed => "reversed",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = HexclockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(DisplayMode::Normal),
            "inverted" | "invert" => Ok(DisplayMode::Inverted),
            "reversed" | "reverse" => Ok(DisplayMode::Reversed),
            other => {
                let expected: Vec<&str> = DisplayMode::ALL.iter().map(|m| m.as_str()).collect();
                Err(HexclockError::Config(format!(
                    "unknown mode '{other}' (expected one of: {})",
                    expected.join(", ")
                )))
            }
        }
    }
}

/// Apply `mode` to a raw hex color.
pub fn transform(raw: HexColor, mode: DisplayMode) -> HexColor {
    match mode {
        DisplayMode::Normal => raw,
        DisplayMode::Inverted => {
            let (r, g, b) = raw.rgb();
            HexColor::from_rgb(255 - r, 255 - g, 255 - b)
        }
        DisplayMode::Reversed => {
            // Walk nibbles from least significant, pushing each onto the front.
            let val = raw.to_u32();
            let reversed = (0..6).fold(0u32, |acc, i| (acc << 4) | ((val >> (4 * i)) & 0xF));
            HexColor::from_u32(reversed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> HexColor {
        HexColor::parse(s).unwrap()
    }

    #[test]
    fn normal_is_identity_uppercased() {
        assert_eq!(transform(hex("#abcdef"), DisplayMode::Normal).to_string(), "#ABCDEF");
    }

    /// `#`-less lowercase and alternating-case spellings of `v`.
    fn spellings(v: u32) -> [String; 3] {
        let lower = format!("{v:06x}");
        let mixed: String = lower
            .chars()
            .enumerate()
            .map(|(i, c)| if i % 2 == 0 { c.to_ascii_uppercase() } else { c })
            .collect();
        [format!("#{lower}"), format!("#{mixed}"), lower]
    }

    #[test]
    fn parsed_strings_obey_all_mode_laws() {
        for v in (0..=0xFF_FFFFu32).step_by(0x00_2A5B) {
            for s in spellings(v) {
                let digits = s.trim_start_matches('#').to_uppercase();
                let expected = format!("#{digits}");
                let c = hex(&s);

                assert_eq!(transform(c, DisplayMode::Normal).to_string(), expected, "normal {s}");

                let inv = transform(c, DisplayMode::Inverted);
                assert_eq!(transform(inv, DisplayMode::Inverted).to_string(), expected, "inverted {s}");

                let rev = transform(c, DisplayMode::Reversed);
                let reversed_digits: String = digits.chars().rev().collect();
                assert_eq!(rev.to_string(), format!("#{reversed_digits}"), "reversed {s}");
                assert_eq!(transform(rev, DisplayMode::Reversed).to_string(), expected, "reversed twice {s}");
            }
        }
    }

    #[test]
    fn inverted_black_is_white() {
        assert_eq!(transform(hex("#000000"), DisplayMode::Inverted).to_string(), "#FFFFFF");
    }

    #[test]
    fn inverted_per_component() {
        assert_eq!(transform(hex("#FF00AA"), DisplayMode::Inverted).to_string(), "#00FF55");
    }

    #[test]
    fn reversed_reverses_characters() {
        assert_eq!(transform(hex("#123456"), DisplayMode::Reversed).to_string(), "#654321");
    }

    #[test]
    fn reversed_is_not_a_component_swap() {
        // A byte-pair swap would give #563412.
        assert_ne!(transform(hex("#123456"), DisplayMode::Reversed).to_string(), "#563412");
    }

    #[test]
    fn reversed_mixed_letters() {
        assert_eq!(transform(hex("#0A0B0C"), DisplayMode::Reversed).to_string(), "#C0B0A0");
    }

    #[test]
    fn inversion_is_its_own_inverse() {
        for v in (0..=0xFF_FFFFu32).step_by(0x01_0307) {
            let c = HexColor::from_u32(v);
            let twice = transform(transform(c, DisplayMode::Inverted), DisplayMode::Inverted);
            assert_eq!(twice, c, "failed for {c}");
        }
    }

    #[test]
    fn reversal_is_its_own_inverse() {
        for v in (0..=0xFF_FFFFu32).step_by(0x01_0307) {
            let c = HexColor::from_u32(v);
            let twice = transform(transform(c, DisplayMode::Reversed), DisplayMode::Reversed);
            assert_eq!(twice, c, "failed for {c}");
        }
    }

    #[test]
    fn extremes_do_not_panic() {
        for mode in DisplayMode::ALL {
            transform(hex("#FFFFFF"), mode);
            transform(hex("#000000"), mode);
        }
    }

    #[test]
    fn mode_parse_and_display() {
        for mode in DisplayMode::ALL {
            assert_eq!(mode.to_string().parse::<DisplayMode>().unwrap(), mode);
        }
        assert_eq!("Invert".parse::<DisplayMode>().unwrap(), DisplayMode::Inverted);
        let err = "sideways".parse::<DisplayMode>().unwrap_err();
        assert!(err.to_string().contains("normal, inverted, reversed"));
    }

    #[test]
    fn mode_defaults_to_normal() {
        assert_eq!(DisplayMode::default(), DisplayMode::Normal);
    }
}
