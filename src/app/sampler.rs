//! Fixed-rate sampling task.
//!
//! Wakes every `sample_period_ms`, reads the raw level of every channel,
//! feeds it through that channel's [`DebounceFilter`], and counts every
//! accepted transition — both edges, so one physical meter pulse normally
//! increments the counter twice. After all channels are processed the
//! local counters are copied into [`SharedCounters`] unconditionally,
//! keeping the shared state current within one sample period whether or
//! not anything changed.
//!
//! The wake deadline is absolute: each wake time is the previous intended
//! wake plus the period, so jitter in one cycle does not compound.

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::info;

use crate::app::filter::{DebounceFilter, Transition};
use crate::app::ports::InputPort;
use crate::app::shared::{Counts, SharedCounters};
use crate::config::SenseConfig;

/// Owns all transient filter state and the authoritative local counters.
pub struct Sampler {
    filters: heapless::Vec<DebounceFilter, { crate::config::MAX_CHANNELS }>,
    counts: Counts,
    period: Duration,
}

impl Sampler {
    /// Build the sampler, seeding every channel's filter from its first
    /// raw read so the filters start settled.
    pub fn new(config: &SenseConfig, input: &mut impl InputPort) -> Self {
        let mut filters = heapless::Vec::new();
        let mut counts = Counts::new();
        for ch in 0..config.channel_count() {
            let level = input.read_level(ch);
            // Config validation bounds the channel count to MAX_CHANNELS.
            let _ = filters.push(DebounceFilter::new(config.filter_depth, level));
            let _ = counts.push(0);
            info!(
                "sampler: channel {} (gpio {}) initial level {}",
                ch,
                config.channels[ch].gpio,
                if level { "HIGH" } else { "LOW" }
            );
        }
        Self {
            filters,
            counts,
            period: Duration::from_millis(u64::from(config.sample_period_ms)),
        }
    }

    /// One sampling cycle: debounce every channel, count accepted
    /// transitions, then copy all counters out under the lock.
    pub fn poll(&mut self, input: &mut impl InputPort, shared: &SharedCounters) {
        for (ch, filter) in self.filters.iter_mut().enumerate() {
            let raw = input.read_level(ch);
            match filter.observe(raw) {
                Some(Transition::Rising) => {
                    info!("sampler: channel {} went LOW -> HIGH", ch);
                    self.counts[ch] += 1;
                }
                Some(Transition::Falling) => {
                    info!("sampler: channel {} went HIGH -> LOW", ch);
                    self.counts[ch] += 1;
                }
                None => {}
            }
        }
        shared.write_all(&self.counts);
    }

    /// Current local counters (test and diagnostics access).
    pub fn counts(&self) -> &Counts {
        &self.counts
    }

    /// Run the sampling loop forever at the configured period.
    pub fn run(mut self, mut input: impl InputPort, shared: Arc<SharedCounters>) -> ! {
        info!(
            "sampler: starting, {} channels at {:?} period",
            self.filters.len(),
            self.period
        );
        let mut next_wake = Instant::now() + self.period;
        loop {
            self.poll(&mut input, &shared);
            std::thread::sleep(next_wake.saturating_duration_since(Instant::now()));
            next_wake += self.period;
        }
    }
}
