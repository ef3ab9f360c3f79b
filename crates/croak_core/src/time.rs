//! Redraw-to-redraw delta for the window runner.
//!
//! Motions advance by the real time between redraws, so a jump lasts the
//! same wall-clock second at 30 or 144 frames per second.

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Measures the time between consecutive redraws.
///
/// The runner calls [`tick`](Self::tick) at the top of every redraw and
/// hands [`dt_seconds`](Self::dt_seconds) to the session. Deltas are not
/// clamped: a stalled window makes running motions catch up in one frame,
/// which may finish them.
#[derive(Debug, Clone)]
pub struct Timer {
    last_tick: Instant,
    delta: Duration,
    frames: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
            delta: Duration::ZERO,
            frames: 0,
        }
    }

    /// Measures the next delta from now. The runner calls this once the
    /// window exists so window creation does not land in the first frame.
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
        self.delta = Duration::ZERO;
    }

    /// Records one redraw.
    pub fn tick(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_tick;
        self.last_tick = now;
        self.frames += 1;
    }

    /// Seconds between the last two ticks (or since the last reset).
    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    /// Redraws recorded so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
