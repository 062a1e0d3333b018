//! Port traits — the boundary between the counting core and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ Sampler / Reporter (domain)
//! ```
//!
//! Driven adapters (GPIO, MQTT) implement these traits. The domain loops
//! consume them via generics, so the core never touches hardware directly
//! and runs unchanged on the host under test.

use core::fmt;

/// Read-side port: raw digital level of one sense channel.
///
/// Implementations must be non-blocking and side-effect-free; the sampler
/// polls every channel once per cycle. A read that cannot reach the
/// hardware returns the last-known or a defined neutral level — input
/// failure is not modelled inside the core.
pub trait InputPort {
    /// Current raw level of `channel` (index into the configured list).
    fn read_level(&mut self, channel: usize) -> bool;
}

/// MQTT-style delivery guarantee requested for a publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QoS {
    AtMostOnce,
    AtLeastOnce,
    ExactlyOnce,
}

/// Transport-assigned identifier of an accepted message.
pub type MessageId = u32;

/// Write-side port: best-effort publish transport.
///
/// No delivery confirmation is consumed by the core; a returned
/// [`MessageId`] means the transport accepted the message for sending,
/// nothing more.
pub trait PublishPort {
    fn publish(
        &mut self,
        topic: &str,
        payload: &[u8],
        qos: QoS,
        retain: bool,
    ) -> Result<MessageId, PublishError>;
}

/// Errors from [`PublishPort`] operations.
///
/// A failed publish is never retried within the same reporter cycle; the
/// staleness check retries naturally on a later cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishError {
    /// The transport has no broker connection.
    NotConnected,
    /// The transport refused or failed to enqueue the message.
    Rejected,
}

impl fmt::Display for PublishError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => write!(f, "not connected"),
            Self::Rejected => write!(f, "message rejected"),
        }
    }
}
