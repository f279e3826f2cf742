//! System configuration parameters
//!
//! All tunable parameters for the AuraLink station. Values are compiled in —
//! the device has no provisioning UI — but live in one struct so host tests
//! and the cycle logic share a single source of truth.

use serde::{Deserialize, Serialize};

// --- Fixed connectivity configuration (compiled in, never runtime input) ---

pub const WIFI_SSID: &str = "YourWiFiSSID";
pub const WIFI_PASSWORD: &str = "YourWiFiPassword";

pub const MQTT_BROKER_HOST: &str = "test.mosquitto.org";
pub const MQTT_BROKER_PORT: u16 = 1883;
pub const MQTT_CLIENT_ID: &str = "auralink-station";

/// Meaning of the temperature LED's steady level.
///
/// Two deployed board generations disagreed on this: one lit the LED
/// steadily when the temperature was *in range*, the other when it was in
/// alert. The firmware names the convention instead of silently picking one.
/// Both conventions blink when the temperature is out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TempLedConvention {
    /// Steady on = temperature in the comfort band (default convention).
    NormalOn,
    /// Steady off in the comfort band; the LED only lights for alerts.
    AlertOn,
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Air quality thresholds (percent of ADC full scale) ---
    /// NOx level at or below which the air is considered safe (LED off).
    pub nox_safe_max_percent: u8,
    /// NOx level above which pollution is high (LED steady on).
    pub nox_high_min_percent: u8,

    // --- Temperature thresholds (Celsius) ---
    /// Above this the temperature LED blinks fast.
    pub temp_high_c: f32,
    /// Below this the temperature LED blinks slow.
    pub temp_low_c: f32,
    /// What the steady temperature LED level means.
    pub temp_led_convention: TempLedConvention,

    // --- Light threshold ---
    /// Ambient light above this percent counts as bright (indicator off).
    pub light_bright_min_percent: u8,

    // --- Blink intervals (milliseconds) ---
    /// NOx caution band blink half-period.
    pub nox_blink_interval_ms: u32,
    /// Hot-alert blink half-period.
    pub temp_high_blink_interval_ms: u32,
    /// Cold-alert blink half-period.
    pub temp_low_blink_interval_ms: u32,
    /// PIR motion blink half-period (non-blocking timer).
    pub pir_blink_interval_ms: u32,

    // --- Timing ---
    /// End-of-cycle sleep; the dominant quantum of the main loop.
    pub cycle_interval_ms: u32,
    /// Sleep after a DHT fault cycle before retrying.
    pub fault_retry_delay_ms: u32,

    // --- Connectivity retry policy ---
    /// WiFi association attempts before the device restarts.
    pub wifi_max_connect_attempts: u32,
    /// Delay between WiFi association attempts.
    pub wifi_retry_delay_ms: u32,
    /// Fixed delay between MQTT reconnect attempts (unbounded retry).
    pub mqtt_retry_delay_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Air quality
            nox_safe_max_percent: 30,
            nox_high_min_percent: 60,

            // Temperature
            temp_high_c: 30.0,
            temp_low_c: 20.0,
            temp_led_convention: TempLedConvention::NormalOn,

            // Light
            light_bright_min_percent: 50,

            // Blink intervals
            nox_blink_interval_ms: 200,
            temp_high_blink_interval_ms: 150,
            temp_low_blink_interval_ms: 500,
            pir_blink_interval_ms: 100,

            // Timing
            cycle_interval_ms: 2000,
            fault_retry_delay_ms: 1000,

            // Connectivity
            wifi_max_connect_attempts: 10,
            wifi_retry_delay_ms: 500,
            mqtt_retry_delay_ms: 5000,
        }
    }
}
