//! Hex color value, user input parsing, and HSL conversion for the rainbow overlay.

use std::fmt;
use std::str::FromStr;

use crate::error::{HexclockError, Result};

/// An RGB color that always renders as `#RRGGBB` (uppercase).
///
/// The only ways to build one are the constructors below, so a `HexColor`
/// is never partially invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    r: u8,
    g: u8,
    b: u8,
}

impl HexColor {
    pub const BLACK: HexColor = HexColor::from_rgb(0, 0, 0);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        HexColor { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value. Bits above 24 are ignored.
    pub const fn from_u32(val: u32) -> Self {
        HexColor {
            r: ((val >> 16) & 0xFF) as u8,
            g: ((val >> 8) & 0xFF) as u8,
            b: (val & 0xFF) as u8,
        }
    }

    /// Build a color whose hex digits spell three two-digit decimal fields.
    ///
    /// `from_decimal_pairs(13, 5, 9)` is `#130509`. Each field is taken
    /// modulo 100 so the result is always six digits.
    pub const fn from_decimal_pairs(a: u32, b: u32, c: u32) -> Self {
        const fn pair(v: u32) -> u8 {
            let v = v % 100;
            (((v / 10) << 4) | (v % 10)) as u8
        }
        HexColor::from_rgb(pair(a), pair(b), pair(c))
    }

    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub const fn rgb(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Parse a user-supplied color.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB` in any case, with
    /// surrounding whitespace. Three-digit forms are expanded by doubling
    /// each digit (`#ABC` → `#AABBCC`).
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(HexclockError::Color(format!(
                "Invalid hex color: {trimmed} (use #RRGGBB or #RGB)"
            )));
        }

        let val = match hex.len() {
            6 => u32::from_str_radix(hex, 16),
            3 => {
                let doubled: String = hex.chars().flat_map(|c| [c, c]).collect();
                u32::from_str_radix(&doubled, 16)
            }
            _ => {
                return Err(HexclockError::Color(format!(
                    "Invalid hex color: {trimmed} (use #RRGGBB or #RGB)"
                )));
            }
        }
        .map_err(|_| HexclockError::Color(format!("Invalid hex color: {trimmed}")))?;

        Ok(HexColor::from_u32(val))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = HexclockError;

    fn from_str(s: &str) -> Result<Self> {
        HexColor::parse(s)
    }
}

/// Convert an HSL triple to RGB. `hue` in degrees (wrapped to 0..360),
/// `saturation` and `lightness` in 0.0..=1.0.
pub fn hsl_to_rgb(hue: u16, saturation: f32, lightness: f32) -> HexColor {
    let h = f32::from(hue % 360) / 60.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let to_byte = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    HexColor::from_rgb(to_byte(r), to_byte(g), to_byte(b))
}
