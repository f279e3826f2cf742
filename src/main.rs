//! AuraLink Station Firmware — Main Entry Point
//!
//! Hexagonal architecture with a single-threaded cooperative control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   LcdDisplay     MqttAdapter   StationClock   │
//! │  (Sensor+Led)      (DisplayPort)  (LinkPort)    (ClockPort)    │
//! │  WifiAdapter       LogEventSink                                │
//! │  (Connectivity)    (EventSink)                                 │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  rules · blink timers · router                         │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One cycle: ensure link → drain inbound → sample → display → LED rules →
//! publish → sleep. Runs until reset; the only fatal path is WiFi
//! association exhausting its bounded attempts at boot.
#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info, warn};

use auralink::adapters::display::LcdDisplay;
use auralink::adapters::hardware::HardwareAdapter;
use auralink::adapters::log_sink::LogEventSink;
use auralink::adapters::mqtt::MqttAdapter;
use auralink::adapters::time::StationClock;
use auralink::adapters::wifi::{ConnectivityPort, WifiAdapter};
use auralink::app::ports::ClockPort;
use auralink::app::service::AppService;
use auralink::config::{self, SystemConfig};
use auralink::diagnostics;
use auralink::drivers::hw_init;
use auralink::drivers::lcd::Lcd;
use auralink::drivers::led::{Led, Polarity};
use auralink::drivers::watchdog::Watchdog;
use auralink::pins;
use auralink::sensors::air_quality::AirQualitySensor;
use auralink::sensors::dht::DhtSensor;
use auralink::sensors::light::LightSensor;
use auralink::sensors::motion::MotionSensor;
use auralink::sensors::SensorHub;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  AuraLink station v{}              ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    diagnostics::install_panic_handler();

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }
    let watchdog = Watchdog::new();

    let config = SystemConfig::default();
    let clock = StationClock::new();
    let mut sink = LogEventSink::new();

    // ── 3. Construct adapters ─────────────────────────────────
    let mut lcd = LcdDisplay::new(Lcd::new(pins::LCD_I2C_ADDR));

    let sensor_hub = SensorHub::new(
        DhtSensor::new(pins::DHT_GPIO),
        LightSensor::new(pins::LDR_ADC_GPIO, pins::LDR_DIGITAL_GPIO),
        AirQualitySensor::new(pins::NOX_ADC_GPIO),
        MotionSensor::new(pins::PIR_GPIO),
    );

    let mut hw = HardwareAdapter::new(
        sensor_hub,
        Led::new(pins::LED_TEMP_GPIO, Polarity::ActiveHigh),
        // The light indicator is wired to VCC, so logical on = pin low.
        Led::new(pins::LED_LIGHT_GPIO, Polarity::ActiveLow),
        Led::new(pins::LED_NOX_GPIO, Polarity::ActiveHigh),
        Led::new(pins::LED_PIR_GPIO, Polarity::ActiveHigh),
        Led::new(pins::LED_URGENCY_GPIO, Polarity::ActiveHigh),
    );

    // ── 4. Boot splash ────────────────────────────────────────
    let mut app = AppService::new(config.clone());
    app.start(&mut lcd, &mut sink);
    clock.sleep_ms(800);

    // ── 5. WiFi association (bounded; exhaustion is fatal) ────
    let mut wifi = WifiAdapter::new();
    if let Err(e) = wifi.set_credentials(config::WIFI_SSID, config::WIFI_PASSWORD) {
        error!("WiFi credentials invalid: {e}");
        diagnostics::device_restart();
    }

    let mut associated = false;
    for attempt in 1..=config.wifi_max_connect_attempts {
        match wifi.connect() {
            Ok(()) => {
                info!("WiFi associated (attempt {attempt})");
                associated = true;
                break;
            }
            Err(e) => {
                warn!(
                    "WiFi attempt {attempt}/{} failed: {e}",
                    config.wifi_max_connect_attempts
                );
                clock.sleep_ms(config.wifi_retry_delay_ms);
            }
        }
    }
    if !associated {
        error!("WiFi association failed — restarting device");
        diagnostics::device_restart();
    }

    // ── 6. MQTT link (connected lazily by the first cycle) ────
    let mut link = MqttAdapter::new();

    info!("System ready. Entering control loop.");

    // ── 7. Control loop ───────────────────────────────────────
    loop {
        app.run_cycle(&mut hw, &mut lcd, &mut link, &clock, &mut sink);
        watchdog.feed();
    }
}
