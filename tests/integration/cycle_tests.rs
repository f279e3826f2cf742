//! Full-cycle integration tests: AppService against mock ports.
//!
//! These run on the host and drive whole cycles through the same code path
//! the device runs, asserting on LED command history, display writes,
//! publishes, and the recorded sleeps.

use crate::mock_hw::{
    faulted_reading, nominal_reading, FakeClock, MockDisplay, MockHardware, MockLink,
    RecordingSink,
};

use auralink::app::events::AppEvent;
use auralink::app::ports::LedChannel;
use auralink::app::service::AppService;
use auralink::config::SystemConfig;
use auralink::messaging::topics::{
    TOPIC_DISPLAY_QUOTE, TOPIC_SENSOR_DATA, TOPIC_URGENCY_LED,
};

fn make_app() -> (AppService, MockDisplay, FakeClock, RecordingSink) {
    (
        AppService::new(SystemConfig::default()),
        MockDisplay::new(),
        FakeClock::new(),
        RecordingSink::new(),
    )
}

// ── Normal cycle ──────────────────────────────────────────────

#[test]
fn normal_cycle_renders_publishes_and_sleeps() {
    let (mut app, mut lcd, clock, mut sink) = make_app();
    let mut hw = MockHardware::new(nominal_reading());
    let mut link = MockLink::connected();

    app.run_cycle(&mut hw, &mut lcd, &mut link, &clock, &mut sink);

    // Display shows the readings screen, every row padded to width.
    assert!(lcd.rows[0].starts_with("T:24.5C  H:60.1%"));
    assert!(lcd.rows[1].starts_with("Light Level: HIGH"));
    assert!(lcd.rows[2].starts_with("NOx: 10% Raw: 410"));
    assert!(lcd.rows[3].starts_with("PIR: No Motion"));
    for row in &lcd.rows {
        assert_eq!(row.len(), 20);
    }

    // Exactly one snapshot published on the sensor topic.
    assert_eq!(link.published.len(), 1);
    assert_eq!(link.published[0].0, TOPIC_SENSOR_DATA);
    let v: serde_json::Value = serde_json::from_slice(&link.published[0].1).unwrap();
    assert!((v["temperature"].as_f64().unwrap() - 24.5).abs() < 1e-3);
    assert!((v["humidity"].as_f64().unwrap() - 60.1).abs() < 1e-3);
    assert_eq!(v["light_percent"], 45);
    assert_eq!(v["nox_percent"], 10);

    // Steady LED levels for a nominal reading: NOx safe → off,
    // temperature in range → on, 45% light → indicator on, no motion.
    assert_eq!(hw.led_level(LedChannel::AirQuality), Some(false));
    assert_eq!(hw.led_level(LedChannel::Temperature), Some(true));
    assert_eq!(hw.led_level(LedChannel::Light), Some(true));
    assert_eq!(hw.led_level(LedChannel::Motion), Some(false));

    // Only the end-of-cycle quantum was slept.
    assert_eq!(*clock.sleeps.borrow(), vec![2000]);
    assert_eq!(app.cycle_count(), 1);
}

// ── Faulted cycle ─────────────────────────────────────────────

#[test]
fn faulted_cycle_degrades_and_skips_rules_and_publish() {
    let (mut app, mut lcd, clock, mut sink) = make_app();
    let mut hw = MockHardware::new(faulted_reading());
    let mut link = MockLink::connected();

    app.run_cycle(&mut hw, &mut lcd, &mut link, &clock, &mut sink);

    assert!(lcd.rows[0].starts_with("DHT22 Error"));
    assert!(lcd.rows[1].starts_with("Check wiring"));
    assert_eq!(lcd.rows[2].trim(), "");
    assert_eq!(lcd.rows[3].trim(), "");

    assert!(link.published.is_empty(), "faulted cycle must not publish");
    assert!(hw.led_calls.is_empty(), "faulted cycle must not drive LEDs");
    assert_eq!(*clock.sleeps.borrow(), vec![1000], "fault retry delay only");
    assert_eq!(sink.count(|e| matches!(e, AppEvent::SensorFault)), 1);
}

#[test]
fn fault_recovers_on_next_good_cycle() {
    let (mut app, mut lcd, clock, mut sink) = make_app();
    let mut hw = MockHardware::new(faulted_reading());
    let mut link = MockLink::connected();

    app.run_cycle(&mut hw, &mut lcd, &mut link, &clock, &mut sink);
    hw.reading = nominal_reading();
    app.run_cycle(&mut hw, &mut lcd, &mut link, &clock, &mut sink);

    assert!(lcd.rows[0].starts_with("T:24.5C"));
    assert_eq!(link.published.len(), 1);
}

// ── Inbound ordering ──────────────────────────────────────────

#[test]
fn inbound_is_applied_before_display_and_publish() {
    let (mut app, mut lcd, clock, mut sink) = make_app();
    let mut hw = MockHardware::new(nominal_reading());
    let mut link = MockLink::connected();
    link.deliver(TOPIC_DISPLAY_QUOTE, b"Tempest in a teacup");

    app.run_cycle(&mut hw, &mut lcd, &mut link, &clock, &mut sink);

    // The quote rows were written first, then the readings screen.
    assert_eq!(lcd.writes.len(), 6);
    assert_eq!(lcd.writes[0].0, 0);
    assert!(lcd.writes[0].1.starts_with("Quote:"));
    assert_eq!(lcd.writes[1].0, 1);
    assert!(lcd.writes[1].1.starts_with("Tempest in a teacup"));
    assert_eq!(
        lcd.writes[2..].iter().map(|(r, _)| *r).collect::<Vec<_>>(),
        vec![0, 1, 2, 3]
    );

    // Event order mirrors the cycle order.
    let msg_idx = sink
        .events
        .iter()
        .position(|e| matches!(e, AppEvent::MessageReceived { .. }))
        .unwrap();
    let sample_idx = sink
        .events
        .iter()
        .position(|e| matches!(e, AppEvent::ReadingSampled(_)))
        .unwrap();
    assert!(msg_idx < sample_idx);
}

// ── Urgency latch ─────────────────────────────────────────────

#[test]
fn urgency_high_low_and_medium_gap() {
    let (mut app, mut lcd, clock, mut sink) = make_app();
    let mut hw = MockHardware::new(nominal_reading());
    let mut link = MockLink::connected();

    // HIGH lights the urgency LED.
    link.deliver(TOPIC_URGENCY_LED, b"HIGH ALERT");
    app.run_cycle(&mut hw, &mut lcd, &mut link, &clock, &mut sink);
    assert_eq!(hw.led_level(LedChannel::Urgency), Some(true));
    assert!(app.urgency_on());

    // MEDIUM is a no-op: the latch keeps its prior state.
    link.deliver(TOPIC_URGENCY_LED, b"MEDIUM");
    app.run_cycle(&mut hw, &mut lcd, &mut link, &clock, &mut sink);
    assert_eq!(hw.led_level(LedChannel::Urgency), Some(true));
    assert!(app.urgency_on());
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::UrgencyChanged { .. })),
        1,
        "MEDIUM must not re-latch"
    );

    // Anything else clears it.
    link.deliver(TOPIC_URGENCY_LED, b"low");
    app.run_cycle(&mut hw, &mut lcd, &mut link, &clock, &mut sink);
    assert_eq!(hw.led_level(LedChannel::Urgency), Some(false));
    assert!(!app.urgency_on());
}

#[test]
fn unknown_topic_is_dropped_silently() {
    let (mut app, mut lcd, clock, mut sink) = make_app();
    let mut hw = MockHardware::new(nominal_reading());
    let mut link = MockLink::connected();
    link.deliver("auralink/other/topic", b"whatever");

    app.run_cycle(&mut hw, &mut lcd, &mut link, &clock, &mut sink);

    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::MessageReceived { .. })),
        0
    );
    // The cycle itself is untouched.
    assert_eq!(link.published.len(), 1);
}

// ── Motion blink (non-blocking) ───────────────────────────────

#[test]
fn motion_blink_toggles_across_cycles_without_stalling() {
    let (mut app, mut lcd, clock, mut sink) = make_app();
    let mut hw = MockHardware::new(nominal_reading());
    hw.reading.motion_detected = true;
    let mut link = MockLink::connected();

    for _ in 0..3 {
        app.run_cycle(&mut hw, &mut lcd, &mut link, &clock, &mut sink);
    }

    // now=0: no toggle yet (phase starts off); each 2 s quantum afterwards
    // is past the 100 ms half-period, so the phase flips every cycle.
    assert_eq!(
        hw.led_history(LedChannel::Motion),
        vec![false, true, false]
    );
    // The motion channel never adds blocking stalls.
    assert_eq!(*clock.sleeps.borrow(), vec![2000, 2000, 2000]);
}

#[test]
fn motion_stop_resets_phase_for_next_event() {
    let (mut app, mut lcd, clock, mut sink) = make_app();
    let mut hw = MockHardware::new(nominal_reading());
    hw.reading.motion_detected = true;
    let mut link = MockLink::connected();

    // Get the phase into the lit state.
    app.run_cycle(&mut hw, &mut lcd, &mut link, &clock, &mut sink);
    app.run_cycle(&mut hw, &mut lcd, &mut link, &clock, &mut sink);
    assert_eq!(hw.led_level(LedChannel::Motion), Some(true));

    // Motion stops: LED off, phase reset.
    hw.reading.motion_detected = false;
    app.run_cycle(&mut hw, &mut lcd, &mut link, &clock, &mut sink);
    assert_eq!(hw.led_level(LedChannel::Motion), Some(false));

    // Motion resumes: the blink starts from the known off phase, so the
    // first tick flips it on.
    hw.reading.motion_detected = true;
    app.run_cycle(&mut hw, &mut lcd, &mut link, &clock, &mut sink);
    assert_eq!(hw.led_level(LedChannel::Motion), Some(true));
}

// ── Blocking blinks ───────────────────────────────────────────

#[test]
fn nox_caution_band_blinks_by_stalling_the_loop() {
    let (mut app, mut lcd, clock, mut sink) = make_app();
    let mut hw = MockHardware::new(nominal_reading());
    hw.reading.air_quality_percent = 45;
    let mut link = MockLink::connected();

    app.run_cycle(&mut hw, &mut lcd, &mut link, &clock, &mut sink);

    assert_eq!(hw.led_history(LedChannel::AirQuality), vec![true, false]);
    assert_eq!(*clock.sleeps.borrow(), vec![200, 200, 2000]);
}

#[test]
fn hot_and_cold_temperatures_blink_at_their_own_rates() {
    let (mut app, mut lcd, clock, mut sink) = make_app();
    let mut hw = MockHardware::new(nominal_reading());
    hw.reading.temperature_c = Some(31.0);
    let mut link = MockLink::connected();

    app.run_cycle(&mut hw, &mut lcd, &mut link, &clock, &mut sink);
    assert_eq!(hw.led_history(LedChannel::Temperature), vec![true, false]);
    assert_eq!(*clock.sleeps.borrow(), vec![150, 150, 2000]);

    hw.reading.temperature_c = Some(12.0);
    hw.led_calls.clear();
    clock.sleeps.borrow_mut().clear();
    app.run_cycle(&mut hw, &mut lcd, &mut link, &clock, &mut sink);
    assert_eq!(hw.led_history(LedChannel::Temperature), vec![true, false]);
    assert_eq!(*clock.sleeps.borrow(), vec![500, 500, 2000]);
}
