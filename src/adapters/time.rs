//! Monotonic clock adapter.
//!
//! Implements [`ClockPort`] for the station.
//!
//! - **`target_os = "espidf"`** — wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (microsecond precision, monotonic).
//! - **`not(target_os = "espidf")`** — uses `std::time::Instant` for
//!   host-side testing and simulation.
//!
//! `sleep_ms` is the loop's only stall primitive; on device it parks the
//! main task via FreeRTOS, on the host it is a plain thread sleep.

use crate::app::ports::ClockPort;

/// Monotonic clock + sleep for the main loop.
pub struct StationClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for StationClock {
    fn default() -> Self {
        Self::new()
    }
}

impl StationClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl ClockPort for StationClock {
    #[cfg(target_os = "espidf")]
    fn now_ms(&self) -> u64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000
    }

    #[cfg(not(target_os = "espidf"))]
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn sleep_ms(&self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}
