//! Fuzz target: `DebounceFilter::observe`
//!
//! Drives arbitrary sample streams through the debounce filter at an
//! arbitrary depth and asserts that it never panics, that the accepted
//! level always tracks the last reported transition, and that the
//! transition count can never exceed the sample count.
//!
//! cargo fuzz run fuzz_debounce_filter

#![no_main]

use libfuzzer_sys::fuzz_target;
use pulsemeter::app::filter::{DebounceFilter, Transition};

fuzz_target!(|data: &[u8]| {
    let Some((&first, samples)) = data.split_first() else {
        return;
    };

    // First byte picks depth (1..=32) and the initial level.
    let depth = (first & 0x1F) + 1;
    let initial = first & 0x80 != 0;

    let mut filter = DebounceFilter::new(depth, initial);
    let mut transitions = 0usize;
    let mut level = initial;

    for &byte in samples {
        for bit in 0..8 {
            let raw = byte & (1 << bit) != 0;
            if let Some(t) = filter.observe(raw) {
                // Transitions must alternate direction.
                let new_level = matches!(t, Transition::Rising);
                assert_ne!(new_level, level, "repeated transition in one direction");
                level = new_level;
                transitions += 1;
            }
            assert_eq!(filter.stable_level(), level);
        }
    }

    assert!(transitions <= samples.len() * 8);
});
