//! Backend messaging — topics, the inbound queue, and the router.
//!
//! The MQTT client delivers messages on its own task; deliveries cross into
//! the single-threaded main loop through a bounded channel drained exactly
//! once per cycle, before that cycle's display/LED/publish steps. That fixed
//! drain point gives deterministic ordering for tests instead of arbitrary
//! interleaving.
//!
//! ```text
//! ┌──────────────┐     ┌───────────────┐     ┌──────────────┐
//! │ MQTT client  │────▶│ Inbound queue │────▶│  Main loop   │
//! │ task (cb)    │     │  (bounded)    │     │  (step 2)    │
//! └──────────────┘     └───────────────┘     └──────────────┘
//! ```

pub mod router;
pub mod topics;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use self::topics::{TOPIC_DISPLAY_QUOTE, TOPIC_DISPLAY_SUMMARY, TOPIC_URGENCY_LED};

/// Maximum bytes of one inbound payload kept after truncation.
pub const PAYLOAD_CAP: usize = 128;

/// Maximum pending deliveries between two drains.
pub const INBOUND_QUEUE_CAP: usize = 8;

/// The message classes the station understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Quote,
    Summary,
    Urgency,
}

impl Topic {
    /// Exact-match topic lookup. Unknown topics yield `None` and the
    /// delivery is dropped silently per the error-handling contract.
    pub fn from_topic_str(topic: &str) -> Option<Self> {
        match topic {
            TOPIC_DISPLAY_QUOTE => Some(Self::Quote),
            TOPIC_DISPLAY_SUMMARY => Some(Self::Summary),
            TOPIC_URGENCY_LED => Some(Self::Urgency),
            _ => None,
        }
    }
}

/// One inbound delivery. Transient — consumed by the router during the
/// drain, never stored beyond the current dispatch.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub topic: Topic,
    pub payload: heapless::String<PAYLOAD_CAP>,
}

impl InboundMessage {
    /// Build a message from a raw delivery. `None` for unknown topics or
    /// non-UTF-8 payloads (both dropped silently). Over-long payloads are
    /// truncated to [`PAYLOAD_CAP`] — the display cuts at 20 chars anyway.
    pub fn from_wire(topic: &str, payload: &[u8]) -> Option<Self> {
        let topic = Topic::from_topic_str(topic)?;
        let text = core::str::from_utf8(payload).ok()?;
        let mut buf: heapless::String<PAYLOAD_CAP> = heapless::String::new();
        for c in text.chars() {
            if buf.push(c).is_err() {
                break;
            }
        }
        Some(Self {
            topic,
            payload: buf,
        })
    }
}

// ── Bounded inbound queue ─────────────────────────────────────
//
// Producer: MQTT client callback task. Consumer: main loop, step 2.
// When the queue is full the newest delivery is dropped — the callback
// must never block.

static INBOUND: Channel<CriticalSectionRawMutex, InboundMessage, INBOUND_QUEUE_CAP> = Channel::new();

/// Enqueue a delivery from the transport callback.
/// Returns `false` if the queue was full (message dropped).
pub fn push_inbound(msg: InboundMessage) -> bool {
    INBOUND.try_send(msg).is_ok()
}

/// Drain all pending deliveries into a handler, FIFO.
/// Called from the main loop only.
pub fn drain_inbound(mut handler: impl FnMut(InboundMessage)) {
    while let Ok(msg) = INBOUND.try_receive() {
        handler(msg);
    }
}
