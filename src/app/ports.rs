//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (sensors, LEDs, the LCD, the MQTT link, the clock)
//! implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly and the whole cycle runs against mocks on the host.

use crate::error::CommsError;
use crate::messaging::InboundMessage;
use crate::sensors::Reading;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per cycle.
pub trait SensorPort {
    /// Read every sensor source once and return a normalized snapshot.
    fn sample(&mut self) -> Reading;
}

// ───────────────────────────────────────────────────────────────
// LED port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// The five managed indicator channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedChannel {
    Temperature,
    Light,
    AirQuality,
    Motion,
    Urgency,
}

/// Write-side port for the status LEDs.
///
/// Levels are *logical*: `true` means lit. Wiring polarity (the light LED
/// is active-low on the station board) is the adapter's concern.
pub trait LedPort {
    fn set_led(&mut self, channel: LedChannel, on: bool);

    /// Kill every LED — used on shutdown paths.
    fn all_leds_off(&mut self) {
        for ch in [
            LedChannel::Temperature,
            LedChannel::Light,
            LedChannel::AirQuality,
            LedChannel::Motion,
            LedChannel::Urgency,
        ] {
            self.set_led(ch, false);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → LCD)
// ───────────────────────────────────────────────────────────────

/// Row-addressable character display. Every write fully overwrites the row
/// to its width — the presenter always hands over padded lines.
pub trait DisplayPort {
    fn write_line(&mut self, row: usize, text: &str);
}

// ───────────────────────────────────────────────────────────────
// Link port (driven adapter: domain ↔ MQTT broker)
// ───────────────────────────────────────────────────────────────

/// The publish/subscribe transport.
///
/// Deliveries arrive asynchronously on the transport's own task; the
/// domain pulls them out through [`drain_inbound`](LinkPort::drain_inbound)
/// at one fixed point per cycle.
pub trait LinkPort {
    fn is_connected(&self) -> bool;

    /// One connection attempt. The caller owns the retry policy.
    fn connect(&mut self) -> Result<(), CommsError>;

    fn subscribe(&mut self, topic: &str) -> Result<(), CommsError>;

    /// Best-effort QoS 0 publish; no acknowledgment tracking.
    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), CommsError>;

    /// Hand every pending delivery to `handler`, FIFO, without blocking.
    fn drain_inbound(&mut self, handler: &mut dyn FnMut(InboundMessage));
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: domain → monotonic time)
// ───────────────────────────────────────────────────────────────

/// Monotonic time plus the loop's only sleep primitive.
///
/// `sleep_ms` is a deliberate, bounded busy-stall of the whole cooperative
/// loop — the blocking blink sequences and the end-of-cycle quantum depend
/// on the exact wall-clock stall, so it must not be hidden behind an async
/// timer.
pub trait ClockPort {
    fn now_ms(&self) -> u64;
    fn sleep_ms(&self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log today;
/// an MQTT telemetry channel would implement the same trait).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
