//! Frame timing driven by host-provided timestamps.
//!
//! The host animation loop samples a wall clock and hands the raw value to
//! [`FrameClock::tick`] once per frame. The clock normalizes it to seconds
//! and guarantees that elapsed time never decreases, even if the host
//! delivers a regressing sample.

/// Raw host timestamps arrive in milliseconds.
const RAW_TIMESTAMP_SCALE: f64 = 1e-3;

/// Tracks elapsed and delta time across frames.
///
/// Elapsed time is monotonically non-decreasing for the lifetime of the
/// process; there is no pause or reset.
#[derive(Debug, Clone)]
pub struct FrameClock {
    elapsed: f64,
    delta: f64,
    frame_count: u64,
    started: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Creates a clock at zero elapsed time.
    #[must_use]
    pub fn new() -> Self {
        Self {
            elapsed: 0.0,
            delta: 0.0,
            frame_count: 0,
            started: false,
        }
    }

    /// Advances the clock with a raw host timestamp (milliseconds).
    ///
    /// Returns the new elapsed time in seconds. A sample earlier than the
    /// previous one is clamped: elapsed time holds and delta is zero.
    pub fn tick(&mut self, raw_ms: f64) -> f32 {
        let seconds = raw_ms * RAW_TIMESTAMP_SCALE;
        if self.started {
            let next = seconds.max(self.elapsed);
            self.delta = next - self.elapsed;
            self.elapsed = next;
        } else {
            self.elapsed = seconds.max(0.0);
            self.delta = 0.0;
            self.started = true;
        }
        self.frame_count += 1;
        self.elapsed as f32
    }

    /// The most recent timestamp, normalized to seconds.
    #[must_use]
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed as f32
    }

    /// Seconds between the two most recent ticks.
    #[must_use]
    pub fn delta_seconds(&self) -> f32 {
        self.delta as f32
    }

    /// Total number of ticks.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
