//! LCD display adapter.
//!
//! Implements [`DisplayPort`] on top of the HD44780 driver. Thin by design:
//! all formatting/padding decisions happen in the presenter, so this layer
//! only forwards rows.

use crate::app::ports::DisplayPort;
use crate::drivers::lcd::Lcd;

pub struct LcdDisplay {
    lcd: Lcd,
}

impl LcdDisplay {
    /// Wrap an already-constructed panel driver and run its init sequence.
    pub fn new(mut lcd: Lcd) -> Self {
        lcd.init();
        Self { lcd }
    }

    /// Access the row buffer for assertions (host/test builds only).
    #[cfg(not(target_os = "espidf"))]
    pub fn line(&self, row: usize) -> &str {
        self.lcd.buffer_line(row)
    }
}

impl DisplayPort for LcdDisplay {
    fn write_line(&mut self, row: usize, text: &str) {
        self.lcd.write_line(row, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pins;

    #[test]
    fn rows_pass_through_to_panel() {
        let mut d = LcdDisplay::new(Lcd::new(pins::LCD_I2C_ADDR));
        d.write_line(0, "Sensors Initializing");
        assert_eq!(d.line(0), "Sensors Initializing");
    }
}
