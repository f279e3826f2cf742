//! MQTT link adapter.
//!
//! Implements [`LinkPort`] against the broker. Deliveries arrive on the
//! MQTT client's own task and are pushed into the bounded inbound queue;
//! the main loop drains that queue through
//! [`drain_inbound`](LinkPort::drain_inbound) once per cycle.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: `esp_idf_svc::mqtt::client::EspMqttClient`.
//! - **all other targets**: in-memory simulation that records publishes and
//!   lets tests inject deliveries through the same queue as the real client.

use log::{info, warn};

use crate::app::ports::LinkPort;
use crate::config;
use crate::error::CommsError;
use crate::messaging::{self, InboundMessage};

// ───────────────────────────────────────────────────────────────
// ESP-IDF implementation
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub struct MqttAdapter {
    client: Option<esp_idf_svc::mqtt::client::EspMqttClient<'static>>,
    connected: std::sync::Arc<core::sync::atomic::AtomicBool>,
}

#[cfg(target_os = "espidf")]
impl MqttAdapter {
    pub fn new() -> Self {
        Self {
            client: None,
            connected: std::sync::Arc::new(core::sync::atomic::AtomicBool::new(false)),
        }
    }
}

#[cfg(target_os = "espidf")]
impl Default for MqttAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "espidf")]
impl LinkPort for MqttAdapter {
    fn is_connected(&self) -> bool {
        self.connected.load(core::sync::atomic::Ordering::Acquire)
    }

    fn connect(&mut self) -> Result<(), CommsError> {
        use core::sync::atomic::Ordering;
        use esp_idf_svc::mqtt::client::{EspMqttClient, EventPayload, MqttClientConfiguration};

        let url = format!(
            "mqtt://{}:{}",
            config::MQTT_BROKER_HOST,
            config::MQTT_BROKER_PORT
        );
        let conf = MqttClientConfiguration {
            client_id: Some(config::MQTT_CLIENT_ID),
            ..Default::default()
        };

        self.connected.store(false, Ordering::Release);
        let connected = std::sync::Arc::clone(&self.connected);

        // The callback runs on the MQTT client task — it must never block,
        // so deliveries only cross into the bounded queue.
        let client = EspMqttClient::new_cb(&url, &conf, move |event| match event.payload() {
            EventPayload::Connected(_) => {
                connected.store(true, Ordering::Release);
            }
            EventPayload::Disconnected => {
                connected.store(false, Ordering::Release);
            }
            EventPayload::Received { topic, data, .. } => {
                if let Some(topic) = topic {
                    match InboundMessage::from_wire(topic, data) {
                        Some(msg) => {
                            if !messaging::push_inbound(msg) {
                                warn!("inbound queue full, dropping delivery on '{topic}'");
                            }
                        }
                        None => log::debug!("ignoring delivery on '{topic}'"),
                    }
                }
            }
            _ => {}
        })
        .map_err(|e| {
            warn!("MQTT client init failed: {e}");
            CommsError::MqttConnectFailed
        })?;

        self.client = Some(client);

        // Block until CONNACK so the caller can subscribe right away.
        for _ in 0..100 {
            if self.is_connected() {
                info!("MQTT: connected to {url} as '{}'", config::MQTT_CLIENT_ID);
                return Ok(());
            }
            std::thread::sleep(std::time::Duration::from_millis(100));
        }

        warn!("MQTT: no CONNACK from {url} within timeout");
        self.client = None;
        Err(CommsError::MqttConnectFailed)
    }

    fn subscribe(&mut self, topic: &str) -> Result<(), CommsError> {
        use esp_idf_svc::mqtt::client::QoS;

        let client = self.client.as_mut().ok_or(CommsError::MqttSubscribeFailed)?;
        client
            .subscribe(topic, QoS::AtMostOnce)
            .map(|_| ())
            .map_err(|e| {
                warn!("MQTT subscribe '{topic}' failed: {e}");
                CommsError::MqttSubscribeFailed
            })
    }

    fn publish(&mut self, topic: &str, payload: &[u8]) -> Result<(), CommsError> {
        use esp_idf_svc::mqtt::client::QoS;

        let client = self.client.as_mut().ok_or(CommsError::MqttPublishFailed)?;
        // enqueue() never blocks the control loop; delivery is best-effort.
        client
            .enqueue(topic, QoS::AtMostOnce, false, payload)
            .map(|_| ())
            .map_err(|e| {
                warn!("MQTT publish '{topic}' failed: {e}");
                CommsError::MqttPublishFailed
            })
    }

    fn drain_inbound(&mut self, handler: &mut dyn FnMut(InboundMessage)) {
        messaging::drain_inbound(handler);
    }
}

// ───────────────────────────────────────────────────────────────
// Host simulation
// ───────────────────────────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
pub struct MqttAdapter {
    connected: bool,
    published: Vec<(String, Vec<u8>)>,
    subscriptions: Vec<String>,
}

#[cfg(not(target_os = "espidf"))]
impl MqttAdapter {
    pub fn new() -> Self {
        Self {
            connected: false,
            published: Vec::new(),
            subscriptions: Vec::new(),
        }
    }

    /// Inject a delivery exactly the way the real client task would.
    pub fn sim_inject(topic: &str, payload: &[u8]) -> bool {
        match InboundMessage::from_wire(topic, payload) {
            Some(msg) => messaging::push_inbound(msg),
            None => false,
        }
    }

    /// Everything published so far, in order.
    pub fn published(&self) -> &[(String, Vec<u8>)] {
        &self.published
    }

    pub fn subscriptions(&self) -> &[String] {
        &self.subscriptions
    }

    /// Simulate a broker drop so the next cycle reconnects.
    pub fn sim_disconnect(&mut self) {
        self.connected = false;
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for MqttAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(not(target_os = "espidf"))]
impl LinkPort for MqttAdapter {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn connect(&mut self) -> Result<(), CommsError> {
        self.connected = true;
        info!(
            "MQTT(sim): connected to {}:{} as '{}'",
            config::MQTT_BROKER_HOST,
            config::MQTT_BROKER_PORT,
            config::MQTT_CLIENT_ID
        );
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
            warn!("MQTT(sim): publish while disconnected");
            return Err(CommsError::MqttPublishFailed);
        }
        self.published.push((topic.to_string(), payload.to_vec()));
        Ok(())
    }

    fn drain_inbound(&mut self, handler: &mut dyn FnMut(InboundMessage)) {
        messaging::drain_inbound(handler);
    }
}
