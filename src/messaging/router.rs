//! Message router — inbound dispatch and the outbound sensor snapshot.
//!
//! Inbound: each delivery maps to exactly one local effect (display rows or
//! an urgency LED command). Outbound: a compact JSON snapshot built fresh
//! from the cycle's reading, published fire-and-forget.

use log::warn;
use serde::Serialize;

use crate::app::ports::DisplayPort;
use crate::control::rules::{self, LedCommand};
use crate::display;
use crate::sensors::Reading;

use super::{InboundMessage, Topic};

/// Dispatch one inbound delivery.
///
/// Display topics write their two rows immediately; the urgency topic is
/// evaluated through the rule table and the resulting command (if any) is
/// returned for the caller to apply to the urgency LED.
pub fn on_inbound(msg: &InboundMessage, display: &mut impl DisplayPort) -> Option<LedCommand> {
    match msg.topic {
        Topic::Quote => {
            for (row, line) in display::render_quote(&msg.payload) {
                display.write_line(row, &line);
            }
            None
        }
        Topic::Summary => {
            for (row, line) in display::render_summary(&msg.payload) {
                display.write_line(row, &line);
            }
            None
        }
        Topic::Urgency => rules::urgency(&msg.payload),
    }
}

/// Wire format of the per-cycle sensor snapshot.
///
/// Field names and units are shared with the backend; temperatures and
/// humidity are rounded to one decimal before serialization.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct OutboundPayload {
    pub temperature: f32,
    pub humidity: f32,
    pub light_percent: u8,
    pub nox_percent: u8,
}

impl OutboundPayload {
    /// Build the snapshot. `None` for a climate-faulted reading — faulted
    /// cycles publish nothing.
    pub fn from_reading(r: &Reading) -> Option<Self> {
        Some(Self {
            temperature: round_tenths(r.temperature_c?),
            humidity: round_tenths(r.humidity_pct?),
            light_percent: r.light_percent,
            nox_percent: r.air_quality_percent,
        })
    }
}

/// Serialize the snapshot for publish. `None` if the reading is faulted or
/// serialization fails (logged, never fatal).
pub fn build_outbound(r: &Reading) -> Option<String> {
    let payload = OutboundPayload::from_reading(r)?;
    match serde_json::to_string(&payload) {
        Ok(json) => Some(json),
        Err(e) => {
            warn!("outbound payload serialization failed: {e}");
            None
        }
    }
}

fn round_tenths(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
