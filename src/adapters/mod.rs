//! Hardware-boundary adapters.
//!
//! Each adapter implements a port trait from [`crate::app::ports`] (or a
//! small concrete service, for time). ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` with host fallbacks, so the whole crate
//! builds and tests on the host.

pub mod gpio;
pub mod mqtt;
pub mod time;
