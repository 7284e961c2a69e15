//! Unified error type for the hexclock-lib crate.
//!
//! [`HexclockError`] covers the few things that can actually go wrong:
//! an unknown timezone identifier, a malformed user-supplied color, an
//! invalid configuration value, or file I/O while persisting settings.

use std::fmt;

/// Unified error type for hexclock-lib operations.
#[derive(Debug)]
pub enum HexclockError {
    /// Timezone identifier could not be resolved.
    Timezone(String),
    /// Color parsing error (manual hex entry, config values).
    Color(String),
    /// Configuration validation error.
    Config(String),
    /// Standard I/O error (config persistence).
    Io(std::io::Error),
}

impl fmt::Display for HexclockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HexclockError::Timezone(e) => write!(f, "Timezone error: {e}"),
            HexclockError::Color(e) => write!(f, "Color error: {e}"),
            HexclockError::Config(e) => write!(f, "Config error: {e}"),
            HexclockError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for HexclockError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HexclockError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for HexclockError {
    fn from(e: std::io::Error) -> Self {
        HexclockError::Io(e)
    }
}

/// Crate-level Result alias using [`HexclockError`].
pub type Result<T> = std::result::Result<T, HexclockError>;
