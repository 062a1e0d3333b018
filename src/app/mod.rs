//! Pulse-counting domain core.
//!
//! ```text
//!   GpioInput ──▶ InputPort ──▶ Sampler ──▶ SharedCounters ──▶ Reporter ──▶ PublishPort ──▶ MqttPublisher
//! ```
//!
//! Two periodic tasks and one shared state block. The [`Sampler`] owns all
//! transient filter state exclusively and is the only writer of
//! [`SharedCounters`]; the [`Reporter`] is its only reader. Data flows one
//! way, and the shared state is a periodically refreshed cache, not a
//! synchronisation barrier between the two loops.
//!
//! [`Sampler`]: sampler::Sampler
//! [`Reporter`]: reporter::Reporter
//! [`SharedCounters`]: shared::SharedCounters

pub mod filter;
pub mod ports;
pub mod reporter;
pub mod sampler;
pub mod shared;
