//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and the five status LEDs, exposing them through
//! [`SensorPort`] and [`LedPort`].  This is the only module besides the LCD
//! adapter that touches actual hardware.  On non-espidf targets, the
//! underlying drivers use cfg-gated simulation stubs.

use crate::app::ports::{LedChannel, LedPort, SensorPort};
use crate::drivers::led::Led;
use crate::sensors::{Reading, SensorHub};

/// Concrete adapter that combines sensors and LEDs behind port traits.
pub struct HardwareAdapter {
    sensor_hub: SensorHub,
    led_temp: Led,
    led_light: Led,
    led_nox: Led,
    led_pir: Led,
    led_urgency: Led,
}

impl HardwareAdapter {
    pub fn new(
        sensor_hub: SensorHub,
        led_temp: Led,
        led_light: Led,
        led_nox: Led,
        led_pir: Led,
        led_urgency: Led,
    ) -> Self {
        Self {
            sensor_hub,
            led_temp,
            led_light,
            led_nox,
            led_pir,
            led_urgency,
        }
    }

    fn led(&mut self, channel: LedChannel) -> &mut Led {
        match channel {
            LedChannel::Temperature => &mut self.led_temp,
            LedChannel::Light => &mut self.led_light,
            LedChannel::AirQuality => &mut self.led_nox,
            LedChannel::Motion => &mut self.led_pir,
            LedChannel::Urgency => &mut self.led_urgency,
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn sample(&mut self) -> Reading {
        self.sensor_hub.read_all()
    }
}

// ── LedPort implementation ────────────────────────────────────

impl LedPort for HardwareAdapter {
    fn set_led(&mut self, channel: LedChannel, on: bool) {
        self.led(channel).set(on);
    }
}
