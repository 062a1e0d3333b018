//! System configuration parameters.
//!
//! All tunables for the pulse counter. Fixed at process start — channel
//! count and filter depth are runtime parameters, but there is no dynamic
//! reconfiguration once the tasks are running.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pins;

/// Maximum number of sense channels the fixed-capacity buffers can hold.
pub const MAX_CHANNELS: usize = 8;

/// One monitored digital input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// GPIO the meter's pulse output is wired to.
    pub gpio: i32,
}

/// Core system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenseConfig {
    /// Ordered list of monitored channels. Channel index N in reports
    /// refers to `channels[N]`.
    pub channels: heapless::Vec<ChannelConfig, MAX_CHANNELS>,

    // --- Sampling ---
    /// Sampler wake period (milliseconds).
    pub sample_period_ms: u32,
    /// Debounce depth: the last `filter_depth` samples must agree before
    /// a level change is accepted (1..=32).
    pub filter_depth: u8,

    // --- Reporting ---
    /// Reporter wake period (milliseconds). Also the minimum spacing
    /// between two publishes.
    pub report_period_ms: u32,
    /// Maximum silence before a heartbeat publish is forced (milliseconds).
    pub max_publish_interval_ms: u32,

    // --- Transport ---
    /// Client identifier, embedded in the publish topic.
    pub client_id: String,
    /// MQTT broker URL handed to the transport adapter.
    pub broker_url: String,
}

impl Default for SenseConfig {
    fn default() -> Self {
        let mut channels = heapless::Vec::new();
        // Capacity is MAX_CHANNELS; two pushes cannot fail.
        let _ = channels.push(ChannelConfig {
            gpio: pins::SENSE0_GPIO,
        });
        let _ = channels.push(ChannelConfig {
            gpio: pins::SENSE1_GPIO,
        });

        Self {
            channels,
            sample_period_ms: 10,          // 100 Hz
            filter_depth: 6,               // 60 ms worst-case debounce latency
            report_period_ms: 1000,        // 1 Hz
            max_publish_interval_ms: 30_000,
            client_id: "pulsemeter".into(),
            broker_url: "mqtt://broker.local:1883".into(),
        }
    }
}

impl SenseConfig {
    /// Reject configurations the counting core cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.channels.is_empty() {
            return Err(Error::Config("channel list is empty"));
        }
        if self.filter_depth == 0 || self.filter_depth > 32 {
            return Err(Error::Config("filter depth must be 1..=32"));
        }
        if self.sample_period_ms == 0 {
            return Err(Error::Config("sample period must be non-zero"));
        }
        if self.report_period_ms == 0 {
            return Err(Error::Config("report period must be non-zero"));
        }
        if self.max_publish_interval_ms < self.report_period_ms {
            return Err(Error::Config(
                "staleness bound must be at least one report period",
            ));
        }
        if self.client_id.is_empty() {
            return Err(Error::Config("client id is empty"));
        }
        Ok(())
    }

    /// Number of configured channels.
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
}
