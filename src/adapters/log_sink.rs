//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to the
//! serial log — the station's side channel. The per-cycle reading line keeps
//! the exact field layout the backend operators already grep for.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::ReadingSampled(r) => {
                // Climate fields are always present here — faulted cycles
                // emit SensorFault instead.
                let t = r.temperature_c.unwrap_or(f32::NAN);
                let h = r.humidity_pct.unwrap_or(f32::NAN);
                info!(
                    "Temp: {t:.1} C | Hum: {h:.1} % | Light: {}% | DO: {} | NOx: {}% | PIR: {}",
                    r.light_percent,
                    if r.light_digital { "LOW" } else { "HIGH" },
                    r.air_quality_percent,
                    if r.motion_detected {
                        "Motion Detected"
                    } else {
                        "No Motion"
                    },
                );
            }
            AppEvent::SensorFault => {
                warn!("DHT22 read error");
            }
            AppEvent::MessageReceived { topic } => {
                info!("MSG   | inbound {:?}", topic);
            }
            AppEvent::UrgencyChanged { on } => {
                info!("URGNT | led {}", if *on { "ON" } else { "OFF" });
            }
            AppEvent::LinkLost => {
                warn!("LINK  | broker connection down, reconnecting");
            }
            AppEvent::LinkRestored { attempts } => {
                info!("LINK  | broker connected (attempt {attempts})");
            }
            AppEvent::Started => {
                info!("START | station up");
            }
        }
    }
}
