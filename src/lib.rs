//! Pulsemeter firmware library.
//!
//! Counts debounced transitions on utility-meter pulse outputs and reports
//! cumulative counts over MQTT. Exposes the pure-logic modules for
//! integration testing; all ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod error;
pub mod tasks;

mod pins;
