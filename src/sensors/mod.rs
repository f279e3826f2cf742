//! Sensor subsystem — individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and produces a [`Reading`] once per
//! cycle. A DHT fault does not abort the read: the other sources are still
//! sampled and the climate fields come back absent, so the caller decides
//! how far the cycle degrades.

pub mod air_quality;
pub mod dht;
pub mod light;
pub mod motion;

use log::warn;

use air_quality::AirQualitySensor;
use dht::DhtSensor;
use light::LightSensor;
use motion::MotionSensor;

/// ADC full scale for the 12-bit converters on the board.
pub const ADC_MAX: u16 = 4095;

/// Normalized snapshot of every sensor for one cycle.
///
/// Immutable after creation. Absent `temperature_c`/`humidity_pct` (always
/// absent together) mean the DHT22 read faulted this cycle; callers must
/// check [`climate_fault`](Reading::climate_fault) before using those fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reading {
    pub temperature_c: Option<f32>,
    pub humidity_pct: Option<f32>,
    /// Ambient light, 0 (dark) – 100 (bright). Clamped.
    pub light_percent: u8,
    /// LDR comparator output (on-board trim threshold).
    pub light_digital: bool,
    /// NOx level, 0 – 100 percent of ADC full scale. Clamped.
    pub air_quality_percent: u8,
    /// Raw NOx ADC value, kept for the diagnostic display line.
    pub air_quality_raw: u16,
    pub motion_detected: bool,
}

impl Reading {
    /// True when the DHT22 read failed this cycle.
    pub fn climate_fault(&self) -> bool {
        self.temperature_c.is_none() || self.humidity_pct.is_none()
    }
}

/// Aggregates all sensor drivers and produces a unified reading.
pub struct SensorHub {
    pub dht: DhtSensor,
    pub light: LightSensor,
    pub air_quality: AirQualitySensor,
    pub motion: MotionSensor,
}

impl SensorHub {
    /// Construct a new hub.  Pass in pre-built drivers (built in main
    /// where pin ownership is established).
    pub fn new(
        dht: DhtSensor,
        light: LightSensor,
        air_quality: AirQualitySensor,
        motion: MotionSensor,
    ) -> Self {
        Self {
            dht,
            light,
            air_quality,
            motion,
        }
    }

    /// Read every sensor once and return a unified snapshot.
    ///
    /// A DHT failure is a value, not an error: the climate fields come back
    /// `None` and everything else is still populated.
    pub fn read_all(&mut self) -> Reading {
        let (temperature_c, humidity_pct) = match self.dht.read() {
            Ok(climate) => (Some(climate.temperature_c), Some(climate.humidity_pct)),
            Err(e) => {
                warn!("DHT22 read error: {e}");
                (None, None)
            }
        };

        let light = self.light.read();
        let air = self.air_quality.read();

        Reading {
            temperature_c,
            humidity_pct,
            light_percent: light.percent,
            light_digital: light.digital,
            air_quality_percent: air.percent,
            air_quality_raw: air.raw,
            motion_detected: self.motion.read(),
        }
    }
}
