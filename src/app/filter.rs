//! Sliding-window debounce filter with edge detection.
//!
//! Mechanical and optical meter outputs bounce; a single raw sample is
//! never trusted. Each channel keeps a bit register of the most recent
//! samples (newest in the low bit) and only flips its accepted logical
//! level when the last `depth` samples unanimously disagree with it.
//! The tradeoff is `depth × sample_period` of detection latency — 60 ms
//! at the defaults (depth 6, 10 ms period).
//!
//! The filter is a pure function of its input history: it cannot fail,
//! only decline to report a transition.

/// An accepted logical level change, after debouncing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Stable level went low → high.
    Rising,
    /// Stable level went high → low.
    Falling,
}

/// Per-channel debounce state. Owned exclusively by the sampler.
#[derive(Debug, Clone)]
pub struct DebounceFilter {
    /// Last 32 raw samples, most recent in bit 0. Bits above `mask` are
    /// shifted garbage and ignored at comparison time.
    history: u32,
    /// Currently accepted logical level.
    stable_high: bool,
    /// Low `depth` bits set.
    mask: u32,
}

impl DebounceFilter {
    /// Build a filter that starts already settled at `initial_level`.
    ///
    /// The history register is seeded fully consistent with the first
    /// observed level, so no spurious transition can be reported at
    /// startup. `depth` must be 1..=32 (enforced by config validation).
    pub fn new(depth: u8, initial_level: bool) -> Self {
        debug_assert!((1..=32).contains(&depth));
        let mask = if depth >= 32 {
            u32::MAX
        } else {
            (1u32 << depth) - 1
        };
        Self {
            history: if initial_level { u32::MAX } else { 0 },
            stable_high: initial_level,
            mask,
        }
    }

    /// Feed one raw sample; returns the accepted transition, if any.
    pub fn observe(&mut self, raw_level: bool) -> Option<Transition> {
        self.history = (self.history << 1) | u32::from(raw_level);
        let masked = self.history & self.mask;

        if masked == 0 && self.stable_high {
            self.stable_high = false;
            Some(Transition::Falling)
        } else if masked == self.mask && !self.stable_high {
            self.stable_high = true;
            Some(Transition::Rising)
        } else {
            None
        }
    }

    /// Currently accepted logical level.
    pub fn stable_level(&self) -> bool {
        self.stable_high
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_is_settled_no_spurious_transition() {
        let mut f = DebounceFilter::new(6, true);
        for _ in 0..100 {
            assert_eq!(f.observe(true), None);
        }
        assert!(f.stable_level());

        let mut f = DebounceFilter::new(6, false);
        for _ in 0..100 {
            assert_eq!(f.observe(false), None);
        }
        assert!(!f.stable_level());
    }

    #[test]
    fn transition_accepted_after_depth_consistent_samples() {
        let mut f = DebounceFilter::new(6, false);
        for _ in 0..5 {
            assert_eq!(f.observe(true), None);
        }
        assert_eq!(f.observe(true), Some(Transition::Rising));
        assert!(f.stable_level());
        // Held high: no further transitions.
        for _ in 0..20 {
            assert_eq!(f.observe(true), None);
        }
    }

    #[test]
    fn single_sample_noise_rejected() {
        let mut f = DebounceFilter::new(6, false);
        // A lone high sample restarts the run; never unanimous.
        for _ in 0..10 {
            assert_eq!(f.observe(true), None);
            assert_eq!(f.observe(false), None);
        }
        assert!(!f.stable_level());
    }

    #[test]
    fn bounce_during_edge_delays_acceptance() {
        let mut f = DebounceFilter::new(4, false);
        // Contact bounce: high, high, low, then clean high run.
        assert_eq!(f.observe(true), None);
        assert_eq!(f.observe(true), None);
        assert_eq!(f.observe(false), None);
        assert_eq!(f.observe(true), None);
        assert_eq!(f.observe(true), None);
        assert_eq!(f.observe(true), None);
        // Fourth consecutive high completes the window.
        assert_eq!(f.observe(true), Some(Transition::Rising));
    }

    #[test]
    fn depth_one_reports_every_flip() {
        let mut f = DebounceFilter::new(1, false);
        assert_eq!(f.observe(true), Some(Transition::Rising));
        assert_eq!(f.observe(false), Some(Transition::Falling));
        assert_eq!(f.observe(true), Some(Transition::Rising));
        assert_eq!(f.observe(true), None);
    }

    #[test]
    fn both_edges_of_a_pulse_are_reported() {
        let mut f = DebounceFilter::new(3, false);
        let mut transitions = Vec::new();
        for level in [true, true, true, false, false, false] {
            if let Some(t) = f.observe(level) {
                transitions.push(t);
            }
        }
        assert_eq!(transitions, vec![Transition::Rising, Transition::Falling]);
    }

    #[test]
    fn depth_32_mask_covers_full_register() {
        let mut f = DebounceFilter::new(32, false);
        for _ in 0..31 {
            assert_eq!(f.observe(true), None);
        }
        assert_eq!(f.observe(true), Some(Transition::Rising));
    }
}
