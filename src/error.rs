//! Unified error types for the pulsemeter firmware.
//!
//! A single `Error` enum that every subsystem can convert into, keeping
//! top-level error handling uniform. All variants are `Copy` so they can
//! be passed around without allocation.
//!
//! Steady-state operation has no error branch at all: the sampler and the
//! publish decision are pure value comparisons. Everything here concerns
//! initialisation and the publish transport.

use core::fmt;

use crate::app::ports::PublishError;

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A resource needed at startup could not be created. Fatal — there is
    /// no valid operating mode without the shared counter state.
    Init(&'static str),
    /// Configuration failed validation.
    Config(&'static str),
    /// The publish transport rejected a message.
    Publish(PublishError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Publish(e) => write!(f, "publish: {e}"),
        }
    }
}

impl core::error::Error for Error {}

impl From<PublishError> for Error {
    fn from(e: PublishError) -> Self {
        Self::Publish(e)
    }
}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
