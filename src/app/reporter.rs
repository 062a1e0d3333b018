//! Publish-decision engine and reporting task.
//!
//! Wakes every `report_period_ms`, takes a coherent snapshot of the shared
//! counters, and publishes when anything changed since the last snapshot —
//! or when nothing has changed for longer than the staleness bound, so a
//! silent channel still proves liveness (heartbeat).
//!
//! Two deliberate asymmetries, both inherited from the fielded behavior:
//!
//! - `previous` advances every cycle whether or not a publish happened.
//!   Change detection compares against the last *observed* values, not the
//!   last *sent* ones. Do not alter silently.
//! - `last_publish_ms` advances only on a publish the transport accepted.
//!   A failed publish is not retried in-cycle; the staleness check retries
//!   naturally on a later cycle, so a transient transport failure cannot
//!   stall counting or future reporting.

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{info, warn};

use crate::adapters::time::MonotonicClock;
use crate::app::ports::{PublishPort, QoS};
use crate::app::shared::{Counts, SharedCounters};
use crate::config::SenseConfig;

/// Reporter-local decision state.
pub struct Reporter {
    topic: String,
    previous: Counts,
    last_publish_ms: u64,
    max_interval_ms: u64,
    period: Duration,
}

impl Reporter {
    /// Build the reporter. `now_ms` becomes the initial publish baseline,
    /// matching the original behavior of arming the staleness timer at
    /// task start rather than at the epoch.
    pub fn new(config: &SenseConfig, now_ms: u64) -> Self {
        let mut previous = Counts::new();
        let _ = previous.resize_default(config.channel_count());
        let topic = format!("raw/{}/counter", config.client_id);
        info!("reporter: topic is {}", topic);
        Self {
            topic,
            previous,
            last_publish_ms: now_ms,
            max_interval_ms: u64::from(config.max_publish_interval_ms),
            period: Duration::from_millis(u64::from(config.report_period_ms)),
        }
    }

    /// Publish topic, fixed at startup.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Pure decision: publish on any element-wise change since the last
    /// snapshot, or force a heartbeat once the staleness bound is exceeded.
    pub fn decide(&self, now_ms: u64, current: &Counts) -> bool {
        *current != self.previous
            || now_ms.saturating_sub(self.last_publish_ms) > self.max_interval_ms
    }

    /// Flat JSON object with one `SenseN` field per channel index.
    pub fn payload(current: &Counts) -> String {
        let mut obj = serde_json::Map::new();
        for (ch, count) in current.iter().enumerate() {
            obj.insert(format!("Sense{ch}"), serde_json::Value::from(*count));
        }
        serde_json::Value::Object(obj).to_string()
    }

    /// One reporting cycle over an already-taken snapshot. Returns whether
    /// a publish was attempted.
    pub fn cycle(
        &mut self,
        now_ms: u64,
        current: &Counts,
        publisher: &mut impl PublishPort,
    ) -> bool {
        let publish = self.decide(now_ms, current);

        if publish {
            let payload = Self::payload(current);
            info!("reporter: publishing {}", payload);
            match publisher.publish(&self.topic, payload.as_bytes(), QoS::AtMostOnce, false) {
                Ok(id) => {
                    info!("reporter: published message id {}", id);
                    self.last_publish_ms = now_ms;
                }
                Err(e) => {
                    // Not retried here; the staleness path will retry.
                    warn!("reporter: publish failed: {}", e);
                }
            }
        }

        // Baseline always advances: compare against last observed values.
        self.previous.clone_from(current);
        publish
    }

    /// Run the reporting loop forever at the configured period, which is
    /// itself the minimum spacing between publishes.
    pub fn run(
        mut self,
        shared: Arc<SharedCounters>,
        mut publisher: impl PublishPort,
        clock: &MonotonicClock,
    ) -> ! {
        info!("reporter: starting at {:?} period", self.period);
        let mut next_wake = Instant::now() + self.period;
        loop {
            let current = shared.read_all();
            let _ = self.cycle(clock.uptime_ms(), &current, &mut publisher);
            std::thread::sleep(next_wake.saturating_duration_since(Instant::now()));
            next_wake += self.period;
        }
    }
}
