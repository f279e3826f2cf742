//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements        | Connects to                 |
//! |------------|-------------------|-----------------------------|
//! | `hardware` | SensorPort        | ESP32 ADC, GPIO             |
//! |            | LedPort           | Status LED GPIOs            |
//! | `display`  | DisplayPort       | HD44780 LCD over I2C        |
//! | `mqtt`     | LinkPort          | MQTT broker (pub/sub)       |
//! | `wifi`     | ConnectivityPort  | ESP-IDF WiFi STA            |
//! | `time`     | ClockPort         | ESP32 system timer          |
//! | `log_sink` | EventSink         | Serial log output           |

pub mod display;
pub mod hardware;
pub mod log_sink;
pub mod mqtt;
pub mod time;
pub mod wifi;
