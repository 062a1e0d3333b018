//! GPIO pin assignments for the pulsemeter board.
//!
//! Single source of truth — adapters and config defaults reference this
//! module rather than hard-coding pin numbers.

/// Sense input 0: reed-switch pulse output of the water meter.
/// External pull-up; the meter shorts the line to ground on each pulse.
pub const SENSE0_GPIO: i32 = 2;

/// Sense input 1: open-collector pulse output of the gas meter.
/// GPIO 34 is input-only on the ESP32, which is fine for a sense line.
pub const SENSE1_GPIO: i32 = 34;
