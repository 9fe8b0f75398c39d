//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use std::collections::VecDeque;

use crate::command::InputEvent;
use crate::engine::Simulation;
use crate::runner::Cockpit;
use crate::snapshot::DisplaySnapshot;

// ===========================================================================
// ScriptedCockpit
// ===========================================================================

/// Cockpit that replays a fixed input script and records every snapshot it
/// is shown. Once the script is exhausted it keeps reporting "no input".
pub struct ScriptedCockpit {
    script: VecDeque<Option<InputEvent>>,
    pub presented: Vec<DisplaySnapshot>,
    fail_present_after: Option<usize>,
}

impl ScriptedCockpit {
    pub fn new(script: Vec<Option<InputEvent>>) -> Self {
        Self {
            script: script.into(),
            presented: Vec::new(),
            fail_present_after: None,
        }
    }

    /// Make `present` fail once it has been called `frames` times, to bound
    /// loops whose script never quits.
    pub fn fail_present_after(mut self, frames: usize) -> Self {
        self.fail_present_after = Some(frames);
        self
    }
}

impl Cockpit for ScriptedCockpit {
    type Error = String;

    fn poll_input(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        Ok(self.script.pop_front().flatten())
    }

    fn present(&mut self, snapshot: &DisplaySnapshot) -> Result<(), Self::Error> {
        self.presented.push(snapshot.clone());
        match self.fail_present_after {
            Some(limit) if self.presented.len() >= limit => {
                Err(format!("present limit {limit} reached"))
            }
            _ => Ok(()),
        }
    }
}

// ===========================================================================
// Simulation drivers
// ===========================================================================

/// Advance a simulation by `ticks` fixed-length steps with no input.
pub fn run_fixed(sim: &mut Simulation, ticks: u64, dt: f64) {
    for _ in 0..ticks {
        sim.update(dt, None);
    }
}

/// Simulation with the given upgrades already applied.
///
/// # Panics
///
/// Panics if any identifier is unknown; test setup bugs should be loud.
pub fn sim_with_upgrades(seed: u64, upgrades: &[&str]) -> Simulation {
    let mut sim = Simulation::new(seed);
    for id in upgrades {
        sim.apply_upgrade(id)
            .unwrap_or_else(|e| panic!("bad test setup: {e}"));
    }
    sim
}
