//! hexclock — the current time rendered as a hex color.

pub mod clock;
pub mod color;
pub mod config;
pub mod error;
pub mod rainbow;
pub mod scheduler;
pub mod time;
pub mod timer;
pub mod transform;

pub use clock::{ClockOptions, ClockPhase, DisplaySink, HexClock};
pub use color::HexColor;
pub use error::HexclockError;
pub use scheduler::{Frame, FrameKind};
pub use transform::{DisplayMode, transform};
