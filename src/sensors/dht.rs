//! DHT22 (AM2302) temperature/humidity sensor driver.
//!
//! Single-wire protocol, bit-banged: the host pulls the line low for ≥1 ms,
//! releases it, the sensor answers with an 80 µs low / 80 µs high preamble
//! and then 40 data bits where the width of the high pulse encodes the bit.
//! Every failure mode (no response, short frame, bad checksum, implausible
//! values) is a [`SensorError`] value — never a panic.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the data GPIO with `esp_timer` for pulse timing.
//! On host/test: reads from static atomics for injection.

use crate::error::SensorError;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, Ordering};

#[cfg(not(target_os = "espidf"))]
static SIM_TEMP_X10: AtomicI32 = AtomicI32::new(240);
#[cfg(not(target_os = "espidf"))]
static SIM_HUM_X10: AtomicU32 = AtomicU32::new(500);
#[cfg(not(target_os = "espidf"))]
static SIM_FAULT: AtomicBool = AtomicBool::new(false);

/// Inject a simulated climate reading (tenths of a unit, like the wire format).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_climate(temperature_c: f32, humidity_pct: f32) {
    SIM_TEMP_X10.store((temperature_c * 10.0) as i32, Ordering::Relaxed);
    SIM_HUM_X10.store((humidity_pct * 10.0) as u32, Ordering::Relaxed);
}

/// Force subsequent simulated reads to fail (wiring-fault injection).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_fault(fault: bool) {
    SIM_FAULT.store(fault, Ordering::Relaxed);
}

/// One successful DHT22 read.
#[derive(Debug, Clone, Copy)]
pub struct ClimateReading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

pub struct DhtSensor {
    _gpio: i32,
}

impl DhtSensor {
    pub fn new(gpio: i32) -> Self {
        Self { _gpio: gpio }
    }

    /// Read one frame from the sensor.
    pub fn read(&mut self) -> Result<ClimateReading, SensorError> {
        let (hum_x10, temp_x10) = self.read_raw()?;

        let humidity_pct = hum_x10 as f32 / 10.0;
        let temperature_c = temp_x10 as f32 / 10.0;

        // Datasheet operating range; anything outside is a corrupt frame
        // that happened to pass the 8-bit checksum.
        if !(0.0..=100.0).contains(&humidity_pct) || !(-40.0..=80.0).contains(&temperature_c) {
            return Err(SensorError::OutOfRange);
        }

        Ok(ClimateReading {
            temperature_c,
            humidity_pct,
        })
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_raw(&mut self) -> Result<(u16, i16), SensorError> {
        if SIM_FAULT.load(Ordering::Relaxed) {
            return Err(SensorError::Timeout);
        }
        Ok((
            SIM_HUM_X10.load(Ordering::Relaxed) as u16,
            SIM_TEMP_X10.load(Ordering::Relaxed) as i16,
        ))
    }

    #[cfg(target_os = "espidf")]
    fn read_raw(&mut self) -> Result<(u16, i16), SensorError> {
        use esp_idf_svc::sys::{
            ets_delay_us, gpio_get_level, gpio_mode_t_GPIO_MODE_INPUT,
            gpio_mode_t_GPIO_MODE_OUTPUT_OD, gpio_pull_mode_t_GPIO_PULLUP_ONLY,
            gpio_set_direction, gpio_set_level, gpio_set_pull_mode,
        };

        let pin = self._gpio;

        // Host start signal: hold the line low for 1.1 ms, then release.
        unsafe {
            gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_OUTPUT_OD);
            gpio_set_level(pin, 0);
            ets_delay_us(1100);
            gpio_set_level(pin, 1);
            gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_INPUT);
            gpio_set_pull_mode(pin, gpio_pull_mode_t_GPIO_PULLUP_ONLY);
        }

        // Sensor preamble: ~80 µs low, ~80 µs high.
        Self::wait_level(pin, 0, 100)?;
        Self::wait_level(pin, 1, 100)?;
        Self::wait_level(pin, 0, 100)?;

        // 40 data bits: 50 µs low separator, then a high pulse whose width
        // encodes the bit (26–28 µs = 0, ~70 µs = 1).
        let mut bytes = [0u8; 5];
        for i in 0..40 {
            Self::wait_level(pin, 1, 80)?;
            let high_us = Self::wait_level(pin, 0, 100)?;
            if high_us > 48 {
                bytes[i / 8] |= 1 << (7 - (i % 8));
            }
        }

        let sum = bytes[0]
            .wrapping_add(bytes[1])
            .wrapping_add(bytes[2])
            .wrapping_add(bytes[3]);
        if sum != bytes[4] {
            return Err(SensorError::ChecksumMismatch);
        }

        let hum_x10 = u16::from(bytes[0]) << 8 | u16::from(bytes[1]);
        let raw_t = u16::from(bytes[2] & 0x7F) << 8 | u16::from(bytes[3]);
        let temp_x10 = if bytes[2] & 0x80 != 0 {
            -(raw_t as i16)
        } else {
            raw_t as i16
        };

        let _ = unsafe { gpio_get_level(pin) };
        Ok((hum_x10, temp_x10))
    }

    /// Busy-wait until the line reaches `level`, returning the elapsed µs.
    #[cfg(target_os = "espidf")]
    fn wait_level(pin: i32, level: i32, timeout_us: u32) -> Result<u32, SensorError> {
        use esp_idf_svc::sys::{esp_timer_get_time, gpio_get_level};

        let start = unsafe { esp_timer_get_time() };
        loop {
            if unsafe { gpio_get_level(pin) } == level {
                return Ok((unsafe { esp_timer_get_time() } - start) as u32);
            }
            if unsafe { esp_timer_get_time() } - start > i64::from(timeout_us) {
                return Err(SensorError::Timeout);
            }
        }
    }
}
