//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them — the stock adapter writes the serial log
//! side channel.

use crate::messaging::Topic;
use crate::sensors::Reading;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The station finished bring-up and entered the main loop.
    Started,

    /// A full, non-faulted reading was taken this cycle.
    ReadingSampled(Reading),

    /// The DHT22 read failed; the cycle degraded to the fault screen.
    SensorFault,

    /// An inbound backend message was dispatched.
    MessageReceived { topic: Topic },

    /// The urgency LED latched a new level.
    UrgencyChanged { on: bool },

    /// The broker link was found down at the start of a cycle.
    LinkLost,

    /// The broker link came (back) up after the given number of attempts.
    LinkRestored { attempts: u32 },
}
