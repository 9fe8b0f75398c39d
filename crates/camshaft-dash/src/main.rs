//! `camshaft`: real-time engine and drivetrain simulation dashboard.
//!
//! Boots a simulation from an optional setup file, applies startup upgrades,
//! then either drives the interactive terminal dashboard or runs headless
//! for a fixed tick count. `--check-determinism` runs the same seed twice
//! and exits nonzero if the runs disagree.

mod cockpit;
mod error;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use camshaft_core::engine::Simulation;
use camshaft_core::gearbox::Gearbox;
use camshaft_core::rng::SimRng;
use camshaft_core::runner::Runner;
use camshaft_core::snapshot::DisplaySnapshot;
use camshaft_core::upgrade::Upgrade;
use camshaft_data::{SimSetup, load_setup};

use crate::cockpit::TerminalCockpit;
use crate::error::DashError;

/// Ticks run when `--check-determinism` is given without `--headless`.
const DEFAULT_CHECK_TICKS: u64 = 600;

#[derive(Parser, Debug)]
#[command(name = "camshaft")]
#[command(about = "Real-time engine and drivetrain simulation dashboard", long_about = None)]
struct Args {
    /// Setup file (.ron, .toml, or .json).
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed; overrides the setup file.
    #[arg(long)]
    seed: Option<u64>,

    /// Target frame rate; overrides the setup file.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    fps: Option<u32>,

    /// Run N fixed ticks without a terminal and dump the final snapshot as JSON.
    #[arg(long, value_name = "N")]
    headless: Option<u64>,

    /// Run the same seed twice and fail if the runs diverge.
    #[arg(long, default_value_t = false)]
    check_determinism: bool,
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode, DashError> {
    let setup = match &args.config {
        Some(path) => load_setup(path)?,
        None => SimSetup::default(),
    };

    let seed = args.seed.or(setup.seed).unwrap_or_else(seed_from_clock);
    let fps = args.fps.unwrap_or(setup.target_fps);

    if args.check_determinism {
        let ticks = args.headless.unwrap_or(DEFAULT_CHECK_TICKS);
        return check_determinism(&setup, seed, ticks, fps);
    }

    let (mut sim, startup_lines) = build_sim(&setup, seed);

    if let Some(ticks) = args.headless {
        // Status goes to stderr so stdout stays parseable.
        for line in &startup_lines {
            eprintln!("{line}");
        }
        let snapshot = run_headless(&mut sim, ticks, fps);
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(ExitCode::SUCCESS);
    }

    // Printed before the alternate screen, so the report is still on the
    // main screen after the dashboard exits.
    for line in &startup_lines {
        println!("{line}");
    }
    run_interactive(&mut sim, fps)?;
    Ok(ExitCode::SUCCESS)
}

/// Build the simulation and apply its startup upgrades, returning the sim
/// and one report line per attempted upgrade.
fn build_sim(setup: &SimSetup, seed: u64) -> (Simulation, Vec<String>) {
    let gearbox = Gearbox::new(setup.gear_ratios.clone());
    let mut sim = Simulation::with_spec(setup.spec.clone(), gearbox, seed);

    let ids: Vec<String> = match &setup.initial_upgrades {
        Some(ids) => ids.clone(),
        None => random_upgrades(seed),
    };

    let mut lines = Vec::with_capacity(ids.len());
    for id in &ids {
        match sim.apply_upgrade(id) {
            Ok(upgrade) => lines.push(format!("{upgrade} applied")),
            Err(e) => lines.push(e.to_string()),
        }
    }
    (sim, lines)
}

/// Every catalog upgrade independently kept with probability one half.
fn random_upgrades(seed: u64) -> Vec<String> {
    let mut picker = SimRng::new(seed);
    Upgrade::ALL
        .iter()
        .filter(|_| picker.chance(0.5))
        .map(|u| u.id().to_string())
        .collect()
}

/// Derive a seed from the wall clock when neither CLI nor setup provide one.
fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Advance `sim` through `ticks` fixed-length frames.
fn run_headless(sim: &mut Simulation, ticks: u64, fps: u32) -> DisplaySnapshot {
    let dt = 1.0 / f64::from(fps);
    for _ in 0..ticks {
        sim.update(dt, None);
    }
    // No frame clock runs headless, so the snapshot reports zero fps.
    sim.snapshot(0.0)
}

/// Run the same setup and seed twice and compare the final snapshots.
fn check_determinism(
    setup: &SimSetup,
    seed: u64,
    ticks: u64,
    fps: u32,
) -> Result<ExitCode, DashError> {
    let (mut first, _) = build_sim(setup, seed);
    let (mut second, _) = build_sim(setup, seed);
    let a = run_headless(&mut first, ticks, fps);
    let b = run_headless(&mut second, ticks, fps);

    if a == b {
        println!("Determinism: PASS ({ticks} ticks, seed {seed})");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("Determinism: FAIL! runs diverged after {ticks} ticks (seed {seed})");
        println!("first:  {}", serde_json::to_string(&a)?);
        println!("second: {}", serde_json::to_string(&b)?);
        Ok(ExitCode::FAILURE)
    }
}

fn run_interactive(sim: &mut Simulation, fps: u32) -> Result<(), DashError> {
    let mut cockpit = TerminalCockpit::enter()?;
    let result = Runner::new(fps).run(sim, &mut cockpit);
    cockpit.leave()?;
    Ok(result?)
}
