//! Mutex-guarded shared counter state.
//!
//! The single shared mutable resource in the firmware. Exactly one writer
//! (the sampler) and one reader (the reporter); access is always a
//! whole-array copy under the lock, never element-wise, so a reader can
//! never observe a torn write that mixes two sampler cycles.
//!
//! The critical section is a fixed-size copy with no allocation and no
//! I/O, so the lock is uncontended in steady state and carries no timeout.

use std::sync::Mutex;

use crate::config::MAX_CHANNELS;
use crate::error::{Error, Result};

/// Per-channel cumulative transition counts, one `u32` per channel.
pub type Counts = heapless::Vec<u32, MAX_CHANNELS>;

/// Shared counter array behind a mutex. Clone-free access is deliberate:
/// the only operations are bulk copy in and bulk copy out.
pub struct SharedCounters {
    inner: Mutex<Counts>,
}

impl SharedCounters {
    /// Create the shared state for `channel_count` channels, all zero.
    ///
    /// Failure here is fatal to the caller — the firmware has no valid
    /// operating mode without its shared state.
    pub fn new(channel_count: usize) -> Result<Self> {
        if channel_count == 0 {
            return Err(Error::Init("shared counters need at least one channel"));
        }
        let mut counts = Counts::new();
        counts
            .resize_default(channel_count)
            .map_err(|()| Error::Init("channel count exceeds MAX_CHANNELS"))?;
        Ok(Self {
            inner: Mutex::new(counts),
        })
    }

    /// Copy all counters in under one lock acquisition.
    pub fn write_all(&self, counts: &Counts) {
        let mut guard = self.lock();
        guard.clone_from(counts);
    }

    /// Copy all counters out under one lock acquisition.
    pub fn read_all(&self) -> Counts {
        self.lock().clone()
    }

    /// Number of channels this state was built for.
    pub fn channel_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Counts> {
        // A poisoned lock still holds a coherent value: the protected data
        // is only ever replaced by a complete whole-array copy.
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn starts_zeroed_at_requested_size() {
        let shared = SharedCounters::new(3).unwrap();
        assert_eq!(shared.channel_count(), 3);
        assert_eq!(shared.read_all().as_slice(), &[0, 0, 0]);
    }

    #[test]
    fn rejects_zero_channels() {
        assert!(matches!(
            SharedCounters::new(0),
            Err(Error::Init(_))
        ));
    }

    #[test]
    fn rejects_oversized_channel_count() {
        assert!(SharedCounters::new(MAX_CHANNELS).is_ok());
        assert!(matches!(
            SharedCounters::new(MAX_CHANNELS + 1),
            Err(Error::Init(_))
        ));
    }

    #[test]
    fn write_then_read_round_trips() {
        let shared = SharedCounters::new(2).unwrap();
        let mut counts = Counts::new();
        counts.extend_from_slice(&[17, 42]).unwrap();
        shared.write_all(&counts);
        assert_eq!(shared.read_all(), counts);
    }

    /// A concurrent reader must only ever see whole writes: the writer
    /// always stores `[k, k]`, so a snapshot with differing elements would
    /// be a torn read.
    #[test]
    fn snapshots_are_never_torn() {
        let shared = Arc::new(SharedCounters::new(2).unwrap());

        let writer = {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || {
                for k in 0..10_000u32 {
                    let mut counts = Counts::new();
                    counts.extend_from_slice(&[k, k]).unwrap();
                    shared.write_all(&counts);
                }
            })
        };

        for _ in 0..10_000 {
            let snap = shared.read_all();
            assert_eq!(snap[0], snap[1], "torn snapshot: {:?}", snap);
        }

        writer.join().unwrap();
    }
}
