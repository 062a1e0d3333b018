//! MQTT publish adapter.
//!
//! [`MqttPublisher`] implements [`PublishPort`] over the ESP-IDF MQTT
//! client. Delivery is best-effort: the returned message id only means
//! the client accepted the message, and connection management (reconnect,
//! backoff) is the ESP-IDF client's own concern.
//!
//! [`LogPublisher`] is the host/simulation counterpart — it writes every
//! payload to the logger and mints message ids locally, which is enough
//! to exercise the full reporting path without a broker.

use log::info;

use crate::app::ports::{MessageId, PublishError, PublishPort, QoS};

#[cfg(target_os = "espidf")]
pub use espidf::MqttPublisher;

#[cfg(target_os = "espidf")]
mod espidf {
    use esp_idf_svc::mqtt::client::{EspMqttClient, MqttClientConfiguration};

    use crate::app::ports::{MessageId, PublishError, PublishPort, QoS};
    use crate::config::SenseConfig;
    use crate::error::{Error, Result};

    /// Publisher backed by the ESP-IDF MQTT client.
    pub struct MqttPublisher {
        client: EspMqttClient<'static>,
    }

    impl MqttPublisher {
        /// Connect to the configured broker. The event callback only logs;
        /// the reporting core consumes no delivery confirmations.
        pub fn connect(config: &SenseConfig) -> Result<Self> {
            let mqtt_cfg = MqttClientConfiguration {
                client_id: Some(&config.client_id),
                ..Default::default()
            };
            let client = EspMqttClient::new_cb(&config.broker_url, &mqtt_cfg, |event| {
                log::debug!("mqtt: event {:?}", event.payload());
            })
            .map_err(|e| {
                log::error!("mqtt: client init failed: {}", e);
                Error::Init("mqtt client init failed")
            })?;
            log::info!("mqtt: connecting to {}", config.broker_url);
            Ok(Self { client })
        }
    }

    impl PublishPort for MqttPublisher {
        fn publish(
            &mut self,
            topic: &str,
            payload: &[u8],
            qos: QoS,
            retain: bool,
        ) -> core::result::Result<MessageId, PublishError> {
            let qos = match qos {
                QoS::AtMostOnce => esp_idf_svc::mqtt::client::QoS::AtMostOnce,
                QoS::AtLeastOnce => esp_idf_svc::mqtt::client::QoS::AtLeastOnce,
                QoS::ExactlyOnce => esp_idf_svc::mqtt::client::QoS::ExactlyOnce,
            };
            self.client
                .publish(topic, qos, retain, payload)
                .map_err(|e| {
                    log::warn!("mqtt: publish to {} failed: {}", topic, e);
                    PublishError::Rejected
                })
        }
    }
}

/// Simulation publisher: logs payloads instead of sending them.
pub struct LogPublisher {
    next_id: MessageId,
}

impl LogPublisher {
    pub fn new() -> Self {
        Self { next_id: 1 }
    }
}

impl Default for LogPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl PublishPort for LogPublisher {
    fn publish(
        &mut self,
        topic: &str,
        payload: &[u8],
        _qos: QoS,
        _retain: bool,
    ) -> Result<MessageId, PublishError> {
        info!(
            "publish(sim) | {} | {}",
            topic,
            String::from_utf8_lossy(payload)
        );
        let id = self.next_id;
        self.next_id += 1;
        Ok(id)
    }
}
