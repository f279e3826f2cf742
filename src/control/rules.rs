//! Sensor-to-LED threshold rules.
//!
//! Pure mappings from a reading (plus, for urgency, an inbound payload) to a
//! desired LED state. No I/O, no clock — timing is the caller's problem, so
//! every rule here is trivially table-testable.
//!
//! LED polarity is deliberately *not* handled here. A rule produces logical
//! `On`/`Off`; wiring quirks (the light LED is active-low on the station
//! board) live in the LED driver.

use crate::config::{SystemConfig, TempLedConvention};

/// Desired state for one LED channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedCommand {
    Off,
    On,
    /// Toggle with the given half-period.
    Blink { interval_ms: u32 },
}

/// Air-quality rule.
///
/// Safe band (≤ `nox_safe_max_percent`) is dark, high pollution
/// (> `nox_high_min_percent`) is steady on, the caution band between them
/// blinks. Both boundaries are inclusive on the lower side.
pub fn air_quality(cfg: &SystemConfig, percent: u8) -> LedCommand {
    if percent <= cfg.nox_safe_max_percent {
        LedCommand::Off
    } else if percent > cfg.nox_high_min_percent {
        LedCommand::On
    } else {
        LedCommand::Blink {
            interval_ms: cfg.nox_blink_interval_ms,
        }
    }
}

/// Temperature rule.
///
/// Returns `None` when the climate reading is faulted — the channel keeps
/// whatever level it had, and the caller skips it for the cycle. In the
/// comfort band the steady level is given by the configured convention
/// (deployed boards light the LED steadily to mean "in range").
pub fn temperature(cfg: &SystemConfig, temp_c: Option<f32>) -> Option<LedCommand> {
    let t = temp_c?;
    let cmd = if t > cfg.temp_high_c {
        LedCommand::Blink {
            interval_ms: cfg.temp_high_blink_interval_ms,
        }
    } else if t < cfg.temp_low_c {
        LedCommand::Blink {
            interval_ms: cfg.temp_low_blink_interval_ms,
        }
    } else {
        match cfg.temp_led_convention {
            TempLedConvention::NormalOn => LedCommand::On,
            TempLedConvention::AlertOn => LedCommand::Off,
        }
    };
    Some(cmd)
}

/// Light-level rule: the indicator is lit when it is dark enough to matter.
pub fn light(cfg: &SystemConfig, light_percent: u8) -> LedCommand {
    if light_percent > cfg.light_bright_min_percent {
        LedCommand::Off
    } else {
        LedCommand::On
    }
}

/// Motion rule: blink continuously while motion persists, dark otherwise.
pub fn motion(cfg: &SystemConfig, detected: bool) -> LedCommand {
    if detected {
        LedCommand::Blink {
            interval_ms: cfg.pir_blink_interval_ms,
        }
    } else {
        LedCommand::Off
    }
}

/// Urgency rule, driven by the backend payload rather than any local sensor.
///
/// `None` means "leave the LED as it is" — a MEDIUM payload deliberately has
/// no effect (the backend never assigned it one, and that gap is preserved).
pub fn urgency(payload: &str) -> Option<LedCommand> {
    if payload.contains("HIGH") {
        Some(LedCommand::On)
    } else if payload.contains("MEDIUM") {
        None
    } else {
        Some(LedCommand::Off)
    }
}
