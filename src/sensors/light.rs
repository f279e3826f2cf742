//! LDR ambient-light sensor (analog level + comparator output).
//!
//! The divider is wired so a *brighter* room gives a *lower* ADC value, so
//! the percent conversion inverts the raw range. The digital channel is the
//! module's on-board comparator, read as a plain logic level.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1_CH6 / GPIO via hw_init.
//! On host/test: reads from static atomics for injection.

use super::ADC_MAX;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};

#[cfg(not(target_os = "espidf"))]
static SIM_LDR_ADC: AtomicU16 = AtomicU16::new(2048);
#[cfg(not(target_os = "espidf"))]
static SIM_LDR_DIGITAL: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_light(raw: u16, digital: bool) {
    SIM_LDR_ADC.store(raw, Ordering::Relaxed);
    SIM_LDR_DIGITAL.store(digital, Ordering::Relaxed);
}

#[derive(Debug, Clone, Copy)]
pub struct LightReading {
    /// 0 (dark) – 100 (bright), clamped.
    pub percent: u8,
    pub raw: u16,
    pub digital: bool,
}

pub struct LightSensor {
    _adc_gpio: i32,
    _digital_gpio: i32,
}

impl LightSensor {
    pub fn new(adc_gpio: i32, digital_gpio: i32) -> Self {
        Self {
            _adc_gpio: adc_gpio,
            _digital_gpio: digital_gpio,
        }
    }

    pub fn read(&mut self) -> LightReading {
        let raw = self.read_adc();
        LightReading {
            percent: raw_to_percent(raw),
            raw,
            digital: self.read_digital(),
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(hw_init::ADC1_CH_LDR)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_LDR_ADC.load(Ordering::Relaxed)
    }

    #[cfg(target_os = "espidf")]
    fn read_digital(&self) -> bool {
        hw_init::gpio_read(self._digital_gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_digital(&self) -> bool {
        SIM_LDR_DIGITAL.load(Ordering::Relaxed)
    }
}

/// Inverted linear mapping: raw 4095 (fully dark) → 0 %, raw 0 → 100 %.
/// Values beyond full scale clamp rather than wrap.
pub fn raw_to_percent(raw: u16) -> u8 {
    let raw = raw.min(ADC_MAX);
    let percent = u32::from(ADC_MAX - raw) * 100 / u32::from(ADC_MAX);
    percent.min(100) as u8
}
