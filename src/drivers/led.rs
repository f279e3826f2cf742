//! Single status LED on a plain GPIO, with wiring polarity.
//!
//! Rules and ports speak in logical levels (`true` = lit). The station
//! board wires the light-level LED active-low, so the polarity translation
//! happens here, once, instead of leaking into rule logic.

use crate::drivers::hw_init;

/// Electrical sense of the LED wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// GPIO high lights the LED.
    ActiveHigh,
    /// GPIO low lights the LED (series resistor to VCC).
    ActiveLow,
}

pub struct Led {
    gpio: i32,
    polarity: Polarity,
    lit: bool,
}

impl Led {
    pub fn new(gpio: i32, polarity: Polarity) -> Self {
        Self {
            gpio,
            polarity,
            lit: false,
        }
    }

    /// Drive the LED to a *logical* level.
    pub fn set(&mut self, on: bool) {
        let level = match self.polarity {
            Polarity::ActiveHigh => on,
            Polarity::ActiveLow => !on,
        };
        hw_init::gpio_write(self.gpio, level);
        self.lit = on;
    }

    pub fn off(&mut self) {
        self.set(false);
    }

    /// Logical state (independent of wiring sense).
    pub fn is_lit(&self) -> bool {
        self.lit
    }
}
