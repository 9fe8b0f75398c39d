//! Camshaft Core -- real-time combustion-engine and drivetrain simulation.
//!
//! This crate provides the performance model, gear-selection state machine,
//! upgrade catalog, deterministic RNG, and the fixed-rate update loop behind
//! the Camshaft dashboard. It has no terminal or rendering dependencies; the
//! frontend connects through the [`runner::Cockpit`] capability.
//!
//! # Tick Pipeline
//!
//! Each call to [`engine::Simulation::update`] advances the simulation by one
//! variable-length tick:
//!
//! 1. **Command** -- Apply the tick's polled driver input, if any.
//! 2. **Dynamics** -- Integrate the stochastic jerk kick through acceleration
//!    into rpm, and drift the coolant temperature, all bounds-clamped.
//! 3. **Events** -- Roll the random water-injection toggle.
//! 4. **Shifting** -- In Automatic mode, move one gear when rpm crosses the
//!    shift thresholds, absorbing 1500 rpm per shift.
//! 5. **Metrics** -- Recompute performance and emissions, then road speed.
//! 6. **Bookkeeping** -- Refresh the transient status notice and the tick
//!    counter.
//!
//! # Key Types
//!
//! - [`engine::Simulation`] -- Owns all state and orchestrates the tick.
//! - [`engine::EngineSpec`] -- Immutable physical constants (bore, stroke,
//!   compression, rev limits, drivetrain geometry).
//! - [`performance::PerformanceMetrics`] -- Power, torque, efficiencies,
//!   fuel, and emissions, rederived every tick.
//! - [`gearbox::Gearbox`] -- Ordered ratio list with one-step clamped shifts.
//! - [`upgrade::UpgradeRegistry`] -- Closed catalog of engine upgrades with
//!   one-way activation.
//! - [`command::ControlCommand`] -- Driver inputs, at most one per tick.
//! - [`snapshot::DisplaySnapshot`] -- Full-precision read model for
//!   renderers, produced once per tick.
//! - [`frame_clock::FrameClock`] -- Sliding-window FPS estimator.
//! - [`runner::Runner`] -- Fixed-rate poll/update/present loop over a
//!   [`runner::Cockpit`].
//! - [`rng::SimRng`] -- Seeded SplitMix64; identical seeds replay identical
//!   runs.

pub mod command;
pub mod engine;
pub mod frame_clock;
pub mod gearbox;
pub mod performance;
pub mod rng;
pub mod runner;
pub mod snapshot;
pub mod upgrade;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
