//! rppal-backed GPIO pins.
//!
//! Buttons are wired between the pin and ground, so inputs use the
//! internal pull-up and a press shows up as a falling edge. rppal
//! delivers interrupt callbacks on its own polling thread.

use std::time::Duration;

use anyhow::{Context, Result};
use rppal::gpio::{Gpio, InputPin, OutputPin, Trigger};

use super::{PressInput, StatusLed};

/// Hardware debounce window. Cheap tactile switches bounce for a few
/// milliseconds; 50 ms filters that out without losing deliberate presses.
const DEBOUNCE: Duration = Duration::from_millis(50);

pub struct GpioButton {
    pin: InputPin,
}

impl GpioButton {
    pub fn new(pin: u8) -> Result<Self> {
        let gpio = Gpio::new().context("Failed to open GPIO")?;
        let pin = gpio
            .get(pin)
            .with_context(|| format!("Failed to claim button pin {}", pin))?
            .into_input_pullup();
        Ok(Self { pin })
    }
}

impl PressInput for GpioButton {
    fn on_press(&mut self, mut callback: Box<dyn FnMut() + Send + 'static>) -> Result<()> {
        // The interrupt registration lives only as long as the InputPin,
        // so the GpioButton must be kept alive after this call.
        self.pin
            .set_async_interrupt(Trigger::FallingEdge, Some(DEBOUNCE), move |_| callback())
            .context("Failed to register press interrupt")?;
        Ok(())
    }
}

pub struct GpioLed {
    pin: OutputPin,
}

impl GpioLed {
    pub fn new(pin: u8) -> Result<Self> {
        let gpio = Gpio::new().context("Failed to open GPIO")?;
        let pin = gpio
            .get(pin)
            .with_context(|| format!("Failed to claim LED pin {}", pin))?
            .into_output_low();
        Ok(Self { pin })
    }
}

impl StatusLed for GpioLed {
    fn set(&mut self, on: bool) {
        if on {
            self.pin.set_high();
        } else {
            self.pin.set_low();
        }
    }
}
