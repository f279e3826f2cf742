//! Broker-link behaviour: the reconnect loop and subscription re-establishment.

use crate::mock_hw::{nominal_reading, FakeClock, MockDisplay, MockHardware, MockLink, RecordingSink};

use auralink::app::events::AppEvent;
use auralink::app::service::AppService;
use auralink::config::SystemConfig;
use auralink::messaging::topics::SUBSCRIPTIONS;

#[test]
fn down_link_reconnects_with_fixed_delay_then_subscribes() {
    let mut app = AppService::new(SystemConfig::default());
    let mut hw = MockHardware::new(nominal_reading());
    let mut lcd = MockDisplay::new();
    let clock = FakeClock::new();
    let mut sink = RecordingSink::new();
    let mut link = MockLink::disconnected(2);

    app.run_cycle(&mut hw, &mut lcd, &mut link, &clock, &mut sink);

    // Two failures then success: three attempts, one fixed delay per failure.
    assert_eq!(link.connect_attempts, 3);
    let sleeps = clock.sleeps.borrow();
    assert_eq!(&sleeps[..2], &[5000, 5000]);

    // Every inbound topic re-subscribed after the reconnect.
    assert_eq!(link.subscriptions.len(), SUBSCRIPTIONS.len());
    for topic in SUBSCRIPTIONS {
        assert!(link.subscriptions.iter().any(|t| t == topic));
    }

    assert_eq!(sink.count(|e| matches!(e, AppEvent::LinkLost)), 1);
    assert!(sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::LinkRestored { attempts: 3 })));

    // The cycle then proceeded normally.
    assert_eq!(link.published.len(), 1);
}

#[test]
fn healthy_link_skips_the_reconnect_path() {
    let mut app = AppService::new(SystemConfig::default());
    let mut hw = MockHardware::new(nominal_reading());
    let mut lcd = MockDisplay::new();
    let clock = FakeClock::new();
    let mut sink = RecordingSink::new();
    let mut link = MockLink::connected();

    app.run_cycle(&mut hw, &mut lcd, &mut link, &clock, &mut sink);

    assert_eq!(link.connect_attempts, 0);
    assert!(link.subscriptions.is_empty());
    assert_eq!(sink.count(|e| matches!(e, AppEvent::LinkLost)), 0);
}

#[test]
fn link_drop_between_cycles_recovers_on_the_next() {
    let mut app = AppService::new(SystemConfig::default());
    let mut hw = MockHardware::new(nominal_reading());
    let mut lcd = MockDisplay::new();
    let clock = FakeClock::new();
    let mut sink = RecordingSink::new();
    let mut link = MockLink::connected();

    app.run_cycle(&mut hw, &mut lcd, &mut link, &clock, &mut sink);
    link.connected = false;
    app.run_cycle(&mut hw, &mut lcd, &mut link, &clock, &mut sink);

    assert_eq!(link.connect_attempts, 1);
    assert_eq!(link.published.len(), 2, "publishing resumes after reconnect");
}
