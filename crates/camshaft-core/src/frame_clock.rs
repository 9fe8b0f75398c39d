//! Frame-rate bookkeeping over a sliding window of frame durations.
//!
//! The clock records the interval between consecutive marks (milliseconds)
//! and reports the average rate across the last [`FRAME_WINDOW`] samples.
//! Marks take an explicit `Instant` so tests can drive the clock without
//! sleeping.

use std::collections::VecDeque;
use std::time::Instant;

/// Number of frame samples the FPS average runs over.
pub const FRAME_WINDOW: usize = 60;

// ---------------------------------------------------------------------------
// FrameClock
// ---------------------------------------------------------------------------

/// Sliding-window frames-per-second estimator.
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Recent frame durations, milliseconds, newest at the back.
    samples: VecDeque<f64>,
    last_mark: Option<Instant>,
    window: usize,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Clock with the standard [`FRAME_WINDOW`] sample window.
    pub fn new() -> Self {
        Self::with_window(FRAME_WINDOW)
    }

    /// Clock with a custom window size.
    ///
    /// # Panics
    ///
    /// Panics if `window` is zero.
    pub fn with_window(window: usize) -> Self {
        assert!(window > 0, "FrameClock window must be at least 1");
        Self {
            samples: VecDeque::with_capacity(window),
            last_mark: None,
            window,
        }
    }

    /// Record a frame boundary at `now`.
    ///
    /// The first mark has no prior timestamp and records a zero-length
    /// interval; the oldest sample falls off once the window is full.
    pub fn mark_at(&mut self, now: Instant) {
        let frame_ms = match self.last_mark {
            Some(last) => now.saturating_duration_since(last).as_secs_f64() * 1000.0,
            None => 0.0,
        };
        self.last_mark = Some(now);

        if self.samples.len() == self.window {
            self.samples.pop_front();
        }
        self.samples.push_back(frame_ms);
    }

    /// Record a frame boundary right now.
    pub fn mark(&mut self) {
        self.mark_at(Instant::now());
    }

    /// Average frames per second over the window; 0.0 until a nonzero
    /// interval has been recorded.
    pub fn fps(&self) -> f64 {
        let total_ms: f64 = self.samples.iter().sum();
        if total_ms <= 0.0 {
            return 0.0;
        }
        self.samples.len() as f64 / (total_ms / 1000.0)
    }

    /// Number of samples currently in the window.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
