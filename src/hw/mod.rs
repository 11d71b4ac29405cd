//! Hardware abstraction for the board's GPIO pins.
//!
//! Two small capabilities are all this utility needs from the hardware:
//! "call me on a press edge for pin P" and "drive one output pin". The
//! traits keep the dispatch logic testable off the Pi; `gpio` holds the
//! rppal-backed implementations used in production.

pub mod gpio;

use anyhow::Result;

pub use gpio::{GpioButton, GpioLed};

/// An input pin that fires a callback on each press edge.
///
/// The callback runs on whatever thread the underlying interrupt
/// mechanism provides, so it must be fast and must not block on I/O.
pub trait PressInput {
    fn on_press(&mut self, callback: Box<dyn FnMut() + Send + 'static>) -> Result<()>;
}

/// A single output pin used for feedback.
pub trait StatusLed: Send {
    fn set(&mut self, on: bool);
}
