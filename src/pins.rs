//! GPIO / peripheral pin assignments for the AuraLink station board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// LDR light sensor, analog output through a resistive divider.
/// Higher raw value = darker. ADC1 channel 6 (GPIO 34 on ESP32).
pub const LDR_ADC_GPIO: i32 = 34;

/// NOx / air-quality sensor, analog output.
/// ADC1 channel 7 (GPIO 35 on ESP32).
pub const NOX_ADC_GPIO: i32 = 35;

// ---------------------------------------------------------------------------
// Sensors — Digital
// ---------------------------------------------------------------------------

/// DHT22 temperature/humidity sensor — single-wire data pin.
pub const DHT_GPIO: i32 = 4;

/// LDR comparator output. HIGH = below the on-board trim threshold.
pub const LDR_DIGITAL_GPIO: i32 = 25;

/// PIR motion sensor output. HIGH = motion detected.
pub const PIR_GPIO: i32 = 26;

// ---------------------------------------------------------------------------
// Status LEDs (digital outputs)
// ---------------------------------------------------------------------------

/// Temperature status LED.
pub const LED_TEMP_GPIO: i32 = 27;
/// Light-level indicator LED. Wired active-low (series resistor to VCC).
pub const LED_LIGHT_GPIO: i32 = 33;
/// NOx / air-quality status LED.
pub const LED_NOX_GPIO: i32 = 18;
/// PIR motion blink LED.
pub const LED_PIR_GPIO: i32 = 19;
/// Urgency indicator LED, driven from the backend only.
pub const LED_URGENCY_GPIO: i32 = 23;

// ---------------------------------------------------------------------------
// I²C bus (character LCD)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;

/// PCF8574 backpack address of the 4×20 LCD (confirmed by bus scan).
pub const LCD_I2C_ADDR: u8 = 0x27;
