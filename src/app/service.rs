//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the device state (blink phases, the urgency latch)
//! and runs one full control cycle per call.  All I/O flows through port
//! traits injected at call sites, making the entire loop testable with mock
//! adapters.
//!
//! ```text
//!   SensorPort ──▶ ┌────────────────────────┐ ──▶ LedPort
//!   LinkPort   ──▶ │       AppService        │ ──▶ DisplayPort
//!   ClockPort  ──▶ │  rules · blink · router │ ──▶ LinkPort (publish)
//!                  └────────────────────────┘ ──▶ EventSink
//! ```
//!
//! A cycle is strictly sequential: link → inbound drain → sample → display →
//! LED rules → publish → sleep.  Inbound handling is fully applied before the
//! display/LED/publish steps begin.

use log::{info, warn};

use crate::config::SystemConfig;
use crate::control::blink::BlinkTimer;
use crate::control::rules::{self, LedCommand};
use crate::display;
use crate::messaging::router;
use crate::messaging::topics::{SUBSCRIPTIONS, TOPIC_SENSOR_DATA};
use crate::sensors::Reading;

use super::events::AppEvent;
use super::ports::{ClockPort, DisplayPort, EventSink, LedChannel, LedPort, LinkPort, SensorPort};

// ───────────────────────────────────────────────────────────────
// Device state
// ───────────────────────────────────────────────────────────────

/// All mutable actuator state, owned in one place instead of scattered
/// globals. Passed through each cycle step; persists across cycles.
#[derive(Debug, Default)]
pub struct DeviceState {
    /// Non-blocking blink phase of the motion LED channel.
    pub pir_blink: BlinkTimer,
    /// Latched urgency LED level; only inbound messages move it.
    pub urgency_on: bool,
}

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    config: SystemConfig,
    state: DeviceState,
    cycle_count: u64,
}

impl AppService {
    pub fn new(config: SystemConfig) -> Self {
        Self {
            config,
            state: DeviceState::default(),
            cycle_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Show the boot splash and announce the service.
    pub fn start(&mut self, lcd: &mut impl DisplayPort, sink: &mut impl EventSink) {
        for (row, line) in display::render_splash().iter().enumerate() {
            lcd.write_line(row, line);
        }
        sink.emit(&AppEvent::Started);
        info!("AppService started");
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full cycle.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and [`LedPort`]
    /// — this avoids a double mutable borrow while keeping the port
    /// boundary explicit.  Blocks for the blink stalls and the end-of-cycle
    /// sleep; on a DHT fault the cycle degrades to the fault screen and
    /// skips the display/LED/publish steps entirely.
    pub fn run_cycle(
        &mut self,
        hw: &mut (impl SensorPort + LedPort),
        lcd: &mut impl DisplayPort,
        link: &mut impl LinkPort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        self.cycle_count += 1;

        // 1. Ensure the broker link; blocks until (re)connected.
        self.ensure_link(link, clock, sink);

        // 2. Drain pending inbound messages — fully applied before any
        //    display/LED/publish work below.
        link.drain_inbound(&mut |msg| {
            sink.emit(&AppEvent::MessageReceived { topic: msg.topic });
            if let Some(cmd) = router::on_inbound(&msg, lcd) {
                let on = match cmd {
                    LedCommand::On => true,
                    LedCommand::Off => false,
                    // The urgency rule never blinks; keep the latch as-is.
                    LedCommand::Blink { .. } => self.state.urgency_on,
                };
                if on != self.state.urgency_on {
                    self.state.urgency_on = on;
                    sink.emit(&AppEvent::UrgencyChanged { on });
                }
                hw.set_led(LedChannel::Urgency, self.state.urgency_on);
            }
        });

        // 3. Sample all sensors once.
        let reading = hw.sample();

        // 4. Degraded cycle on a climate fault: fault screen, short sleep,
        //    no rules, no publish.
        if reading.climate_fault() {
            sink.emit(&AppEvent::SensorFault);
            for (row, line) in display::render_fault().iter().enumerate() {
                lcd.write_line(row, line);
            }
            clock.sleep_ms(self.config.fault_retry_delay_ms);
            return;
        }

        // 5. Readings screen + serial side channel.
        for (row, line) in display::render_readings(&reading).iter().enumerate() {
            lcd.write_line(row, line);
        }
        sink.emit(&AppEvent::ReadingSampled(reading));

        // 6. LED rules, including the blocking blink stalls.
        self.apply_led_rules(&reading, hw, clock);

        // 7. Fire-and-forget snapshot publish.
        if let Some(json) = router::build_outbound(&reading) {
            if let Err(e) = link.publish(TOPIC_SENSOR_DATA, json.as_bytes()) {
                warn!("sensor publish failed: {e}");
            }
        }

        // 8. End-of-cycle quantum.
        clock.sleep_ms(self.config.cycle_interval_ms);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Total cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// Current urgency LED latch.
    pub fn urgency_on(&self) -> bool {
        self.state.urgency_on
    }

    /// Clone of the live configuration.
    pub fn current_config(&self) -> SystemConfig {
        self.config.clone()
    }

    // ── Internal ──────────────────────────────────────────────

    /// Reconnect loop: unbounded fixed-delay retry until the link is up,
    /// then re-establish every subscription.
    fn ensure_link(
        &self,
        link: &mut impl LinkPort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        if link.is_connected() {
            return;
        }
        sink.emit(&AppEvent::LinkLost);

        let mut attempts: u32 = 0;
        loop {
            attempts += 1;
            match link.connect() {
                Ok(()) => {
                    for topic in SUBSCRIPTIONS {
                        if let Err(e) = link.subscribe(topic) {
                            warn!("subscribe '{topic}' failed: {e}");
                        }
                    }
                    sink.emit(&AppEvent::LinkRestored { attempts });
                    return;
                }
                Err(e) => {
                    warn!(
                        "MQTT connect failed ({e}), retry in {} ms",
                        self.config.mqtt_retry_delay_ms
                    );
                    clock.sleep_ms(self.config.mqtt_retry_delay_ms);
                }
            }
        }
    }

    /// Evaluate every sensor-driven rule and push the results to the LEDs.
    fn apply_led_rules(
        &mut self,
        r: &Reading,
        hw: &mut impl LedPort,
        clock: &impl ClockPort,
    ) {
        // Air quality: the caution band blinks by stalling the loop.
        Self::apply_steady_or_stall(
            hw,
            clock,
            LedChannel::AirQuality,
            rules::air_quality(&self.config, r.air_quality_percent),
        );

        // Temperature: no command at all when the reading is faulted.
        if let Some(cmd) = rules::temperature(&self.config, r.temperature_c) {
            Self::apply_steady_or_stall(hw, clock, LedChannel::Temperature, cmd);
        }

        // Light: steady only.
        let light_on = rules::light(&self.config, r.light_percent) == LedCommand::On;
        hw.set_led(LedChannel::Light, light_on);

        // Motion: the one channel on the non-blocking timer. The phase must
        // not miss its toggle window, so it reads the live clock here.
        match rules::motion(&self.config, r.motion_detected) {
            LedCommand::Blink { interval_ms } => {
                let phase = self.state.pir_blink.tick(interval_ms, clock.now_ms());
                hw.set_led(LedChannel::Motion, phase);
            }
            LedCommand::On => hw.set_led(LedChannel::Motion, true),
            LedCommand::Off => {
                self.state.pir_blink.reset();
                hw.set_led(LedChannel::Motion, false);
            }
        }
    }

    /// Apply a steady command directly; a blink command becomes one
    /// on/off pulse that deliberately stalls the whole loop for two
    /// half-periods (bounded, ≤ 2 × 500 ms).
    fn apply_steady_or_stall(
        hw: &mut impl LedPort,
        clock: &impl ClockPort,
        channel: LedChannel,
        cmd: LedCommand,
    ) {
        match cmd {
            LedCommand::Off => hw.set_led(channel, false),
            LedCommand::On => hw.set_led(channel, true),
            LedCommand::Blink { interval_ms } => {
                hw.set_led(channel, true);
                clock.sleep_ms(interval_ms);
                hw.set_led(channel, false);
                clock.sleep_ms(interval_ms);
            }
        }
    }
}
