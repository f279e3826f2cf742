//! Mock adapters for integration tests.
//!
//! Record every port call so tests can assert on the full command history
//! without touching real GPIO/I2C or a live broker. The mock link owns its
//! own inbound queue, keeping tests independent of the process-wide
//! delivery channel.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use auralink::app::events::AppEvent;
use auralink::app::ports::{
    ClockPort, DisplayPort, EventSink, LedChannel, LedPort, LinkPort, SensorPort,
};
use auralink::display::{LINE_WIDTH, ROWS};
use auralink::error::CommsError;
use auralink::messaging::InboundMessage;
use auralink::sensors::Reading;

// ── MockHardware ──────────────────────────────────────────────

/// Sensor + LED double. The next reading is injected; every LED write is
/// recorded in order.
pub struct MockHardware {
    pub reading: Reading,
    pub led_calls: Vec<(LedChannel, bool)>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(reading: Reading) -> Self {
        Self {
            reading,
            led_calls: Vec::new(),
        }
    }

    /// Last commanded level for a channel, if it was ever touched.
    pub fn led_level(&self, channel: LedChannel) -> Option<bool> {
        self.led_calls
            .iter()
            .rev()
            .find(|(ch, _)| *ch == channel)
            .map(|(_, on)| *on)
    }

    /// Every level commanded to one channel, in order.
    pub fn led_history(&self, channel: LedChannel) -> Vec<bool> {
        self.led_calls
            .iter()
            .filter(|(ch, _)| *ch == channel)
            .map(|(_, on)| *on)
            .collect()
    }
}

impl SensorPort for MockHardware {
    fn sample(&mut self) -> Reading {
        self.reading
    }
}

impl LedPort for MockHardware {
    fn set_led(&mut self, channel: LedChannel, on: bool) {
        self.led_calls.push((channel, on));
    }
}

/// A healthy mid-range reading.
pub fn nominal_reading() -> Reading {
    Reading {
        temperature_c: Some(24.5),
        humidity_pct: Some(60.1),
        light_percent: 45,
        light_digital: false,
        air_quality_percent: 10,
        air_quality_raw: 410,
        motion_detected: false,
    }
}

/// A reading whose DHT22 read failed.
pub fn faulted_reading() -> Reading {
    Reading {
        temperature_c: None,
        humidity_pct: None,
        ..nominal_reading()
    }
}

// ── MockDisplay ───────────────────────────────────────────────

/// Records the write order and keeps the resulting screen contents.
pub struct MockDisplay {
    pub writes: Vec<(usize, String)>,
    pub rows: [String; ROWS],
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn new() -> Self {
        Self {
            writes: Vec::new(),
            rows: core::array::from_fn(|_| " ".repeat(LINE_WIDTH)),
        }
    }
}

impl Default for MockDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayPort for MockDisplay {
    fn write_line(&mut self, row: usize, text: &str) {
        self.writes.push((row, text.to_string()));
        if row < ROWS {
            self.rows[row] = text.to_string();
        }
    }
}

// ── MockLink ──────────────────────────────────────────────────

/// Broker double with its own pending-delivery queue.
pub struct MockLink {
    pub connected: bool,
    /// Connect attempts that should fail before one succeeds.
    pub connect_failures: u32,
    pub connect_attempts: u32,
    pub subscriptions: Vec<String>,
    pub published: Vec<(String, Vec<u8>)>,
    pub pending: VecDeque<InboundMessage>,
}

#[allow(dead_code)]
impl MockLink {
    pub fn connected() -> Self {
        Self {
            connected: true,
            connect_failures: 0,
            connect_attempts: 0,
            subscriptions: Vec::new(),
            published: Vec::new(),
            pending: VecDeque::new(),
        }
    }

    pub fn disconnected(connect_failures: u32) -> Self {
        Self {
            connected: false,
            ..Self::connected()
        }
        .with_failures(connect_failures)
    }

    fn with_failures(mut self, n: u32) -> Self {
        self.connect_failures = n;
        self
    }

    /// Queue a delivery as if the broker pushed it between cycles.
    pub fn deliver(&mut self, topic: &str, payload: &[u8]) {
        if let Some(msg) = InboundMessage::from_wire(topic, payload) {
            self.pending.push_back(msg);
        }
    }
}

impl LinkPort for MockLink {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn connect(&mut self) -> Result<(), CommsError> {
        self.connect_attempts += 1;
        if self.connect_failures > 0 {
            self.connect_failures -= 1;
            return Err(CommsError::MqttConnectFailed);
        }
        self.connected = true;
        Ok(())
    }

    fn subscribe(&mut self, topic: &str) -> Result<(), CommsError> {
        if !self.connected {
            return Err(CommsError::MqttSubscribeFailed);
        }
        self.subscriptions.push(topic.to_string());
        Ok(())
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), CommsError> {
        if !self.connected {
            return Err(CommsError::MqttPublishFailed);
        }
        self.published.push((topic.to_string(), payload.to_vec()));
        Ok(())
    }

    fn drain_inbound(&mut self, handler: &mut dyn FnMut(InboundMessage)) {
        while let Some(msg) = self.pending.pop_front() {
            handler(msg);
        }
    }
}

// ── FakeClock ─────────────────────────────────────────────────

/// Deterministic clock: `sleep_ms` advances simulated time instantly and
/// records the stall so tests can assert on blink timing.
pub struct FakeClock {
    now: Cell<u64>,
    pub sleeps: RefCell<Vec<u32>>,
}

#[allow(dead_code)]
impl FakeClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(0),
            sleeps: RefCell::new(Vec::new()),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn total_slept_ms(&self) -> u64 {
        self.sleeps.borrow().iter().map(|&ms| u64::from(ms)).sum()
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockPort for FakeClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }

    fn sleep_ms(&self, ms: u32) {
        self.sleeps.borrow_mut().push(ms);
        self.advance(u64::from(ms));
    }
}

// ── Event recorder ────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
