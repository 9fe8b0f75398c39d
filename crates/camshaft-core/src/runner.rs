//! Fixed-rate driver connecting a [`Simulation`] to a cockpit.
//!
//! The cockpit is the injected I/O capability: anything that can poll for a
//! driver input and present a snapshot. The runner owns the pacing — one
//! poll, one update, one present per frame, then sleep off the rest of the
//! frame budget. A frame that overruns its budget just skips the sleep;
//! there is no catch-up stepping.

use std::thread;
use std::time::{Duration, Instant};

use crate::command::InputEvent;
use crate::engine::Simulation;
use crate::frame_clock::FrameClock;
use crate::snapshot::DisplaySnapshot;

/// Default loop rate, frames per second.
pub const DEFAULT_HZ: u32 = 60;

// ---------------------------------------------------------------------------
// Cockpit
// ---------------------------------------------------------------------------

/// The I/O seam between the simulation loop and the outside world.
///
/// Implementations must never block in [`poll_input`]: returning `None`
/// means "no input this tick" and keeps the loop running at rate.
///
/// [`poll_input`]: Cockpit::poll_input
pub trait Cockpit {
    type Error;

    /// Best-effort check for one pending input event.
    fn poll_input(&mut self) -> Result<Option<InputEvent>, Self::Error>;

    /// Show the tick's snapshot to the driver.
    fn present(&mut self, snapshot: &DisplaySnapshot) -> Result<(), Self::Error>;
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// Paces the poll → update → present cycle at a fixed target rate.
#[derive(Debug, Clone)]
pub struct Runner {
    frame_budget: Duration,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(DEFAULT_HZ)
    }
}

impl Runner {
    /// Runner targeting `target_hz` frames per second.
    ///
    /// # Panics
    ///
    /// Panics if `target_hz` is zero.
    pub fn new(target_hz: u32) -> Self {
        assert!(target_hz > 0, "Runner requires a nonzero frame rate");
        Self {
            frame_budget: Duration::from_secs_f64(1.0 / target_hz as f64),
        }
    }

    /// Frame budget this runner paces to.
    pub fn frame_budget(&self) -> Duration {
        self.frame_budget
    }

    /// Drive the loop until the cockpit yields [`InputEvent::Quit`] or
    /// returns an error.
    ///
    /// `dt` is wall time between consecutive frame starts, so the first tick
    /// sees a near-zero interval and a stalled frame is integrated at its
    /// real length on the next pass.
    pub fn run<C: Cockpit>(&self, sim: &mut Simulation, cockpit: &mut C) -> Result<(), C::Error> {
        let mut clock = FrameClock::new();
        let mut previous_start = Instant::now();

        loop {
            let frame_start = Instant::now();

            let command = match cockpit.poll_input()? {
                Some(InputEvent::Quit) => return Ok(()),
                Some(InputEvent::Command(command)) => Some(command),
                None => None,
            };

            let dt = frame_start.duration_since(previous_start).as_secs_f64();
            previous_start = frame_start;

            sim.update(dt, command);
            clock.mark_at(frame_start);

            let snapshot = sim.snapshot(clock.fps());
            cockpit.present(&snapshot)?;

            if let Some(remaining) = self.frame_budget.checked_sub(frame_start.elapsed()) {
                thread::sleep(remaining);
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
