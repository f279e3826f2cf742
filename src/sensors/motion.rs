//! PIR motion sensor — plain digital level, HIGH while motion persists.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the PIR GPIO via hw_init.
//! On host/test: reads from a static atomic for injection.

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, Ordering};

#[cfg(not(target_os = "espidf"))]
static SIM_PIR: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_motion(detected: bool) {
    SIM_PIR.store(detected, Ordering::Relaxed);
}

pub struct MotionSensor {
    _gpio: i32,
}

impl MotionSensor {
    pub fn new(gpio: i32) -> Self {
        Self { _gpio: gpio }
    }

    #[cfg(target_os = "espidf")]
    pub fn read(&mut self) -> bool {
        hw_init::gpio_read(self._gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read(&mut self) -> bool {
        SIM_PIR.load(Ordering::Relaxed)
    }
}
