//! Pulsemeter firmware — main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  GpioInput          MqttPublisher        MonotonicClock  │
//! │  (InputPort)        (PublishPort)        (time)          │
//! │                                                          │
//! │  ───────────── Port Trait Boundary ──────────────        │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │ Sampler ──▶ SharedCounters ──▶ Reporter        │      │
//! │  │ (APP core, 100 Hz)   (mutex)   (main task, 1 Hz)│     │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;

use pulsemeter::adapters::gpio::GpioInput;
use pulsemeter::adapters::time::MonotonicClock;
use pulsemeter::app::reporter::Reporter;
use pulsemeter::app::sampler::Sampler;
use pulsemeter::app::shared::SharedCounters;
use pulsemeter::config::SenseConfig;
use pulsemeter::tasks::{self, Core};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }

    info!("pulsemeter v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration (fixed at process start) ─────────────
    let config = SenseConfig::default();
    config.validate().context("invalid configuration")?;
    info!(
        "config: {} channels, sample {}ms depth {}, report {}ms, heartbeat {}ms",
        config.channel_count(),
        config.sample_period_ms,
        config.filter_depth,
        config.report_period_ms,
        config.max_publish_interval_ms,
    );

    // ── 3. Shared counter state — fatal if unavailable ────────
    let shared = Arc::new(
        SharedCounters::new(config.channel_count()).context("shared state init failed")?,
    );

    // ── 4. Adapters ───────────────────────────────────────────
    let mut input = GpioInput::new(&config.channels).context("gpio init failed")?;
    let clock = MonotonicClock::new();

    #[cfg(target_os = "espidf")]
    let publisher = pulsemeter::adapters::mqtt::MqttPublisher::connect(&config)
        .context("mqtt init failed")?;
    #[cfg(not(target_os = "espidf"))]
    let publisher = pulsemeter::adapters::mqtt::LogPublisher::new();

    // ── 5. Sampling task, pinned to the APP core ──────────────
    let sampler = Sampler::new(&config, &mut input);
    let sampler_shared = Arc::clone(&shared);
    let _sampler_task = tasks::spawn_on_core(Core::App, 10, 8, "sampler\0", move || {
        sampler.run(input, sampler_shared);
    });

    // ── 6. Reporter on the main task ──────────────────────────
    let reporter = Reporter::new(&config, clock.uptime_ms());
    reporter.run(shared, publisher, &clock)
}
