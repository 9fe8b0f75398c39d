//! Scripted drive example: no terminal, no pacing, just the simulation.
//!
//! Bolts a turbocharger onto the reference engine, holds the throttle for
//! five simulated seconds, coasts for five more, and prints a status line
//! once per simulated second.
//!
//! Run with: `cargo run -p camshaft-core --example scripted_drive`

use camshaft_core::command::ControlCommand;
use camshaft_core::engine::Simulation;

const DT: f64 = 1.0 / 60.0;
const TICKS_PER_SECOND: u64 = 60;

fn main() {
    let mut sim = Simulation::new(42);

    match sim.apply_upgrade("turbocharger") {
        Ok(upgrade) => println!("{upgrade} applied"),
        Err(e) => println!("{e}"),
    }
    println!();

    // --- Phase 1: full throttle for 5 seconds ---

    for second in 0..5 {
        for _ in 0..TICKS_PER_SECOND {
            sim.update(DT, Some(ControlCommand::Accelerate));
        }
        print_status(second + 1, &sim);
    }

    // --- Phase 2: hands off for 5 seconds ---

    for second in 5..10 {
        for _ in 0..TICKS_PER_SECOND {
            sim.update(DT, None);
        }
        print_status(second + 1, &sim);
    }

    let snapshot = sim.snapshot(60.0);
    println!(
        "\nFinal: tick {}, {:.0} rpm, gear {}/{}, {:.1} km/h, {:.1} kW",
        snapshot.tick,
        snapshot.rpm,
        snapshot.gear,
        snapshot.gear_count,
        snapshot.vehicle_speed * 3.6,
        snapshot.power_kw,
    );
}

fn print_status(second: u64, sim: &Simulation) {
    println!(
        "t={second:>2}s  rpm={:>6.0}  gear={}  speed={:>5.1} km/h  temp={:>5.1} °C  power={:>5.1} kW",
        sim.state.rpm,
        sim.gearbox.current_gear(),
        sim.vehicle_speed() * 3.6,
        sim.state.temperature,
        sim.metrics.power_kw,
    );
}
