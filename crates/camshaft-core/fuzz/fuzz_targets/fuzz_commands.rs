#![no_main]
use arbitrary::Arbitrary;
use camshaft_core::command::ControlCommand;
use camshaft_core::engine::{
    ACCEL_LIMIT, JERK_LIMIT, Simulation, TEMP_CEIL_C, TEMP_FLOOR_C,
};
use camshaft_core::upgrade::Upgrade;
use libfuzzer_sys::fuzz_target;

/// A structured driver action for fuzzing.
#[derive(Arbitrary, Debug)]
enum FuzzOp {
    Accelerate,
    Decelerate,
    ShiftUp,
    ShiftDown,
    ToggleMode,
    ApplyUpgrade { index: u8 },
    SetWaterInjection { active: bool },
    Tick { millis: u16 },
}

/// Top-level fuzz input: an RNG seed and a sequence of actions.
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    seed: u64,
    ops: Vec<FuzzOp>,
}

fuzz_target!(|input: FuzzInput| {
    let mut sim = Simulation::new(input.seed);

    // Limit operations to prevent timeouts.
    let max_ops = input.ops.len().min(200);

    for op in &input.ops[..max_ops] {
        match op {
            FuzzOp::Accelerate => sim.update(0.0, Some(ControlCommand::Accelerate)),
            FuzzOp::Decelerate => sim.update(0.0, Some(ControlCommand::Decelerate)),
            FuzzOp::ShiftUp => sim.update(0.0, Some(ControlCommand::ShiftUp)),
            FuzzOp::ShiftDown => sim.update(0.0, Some(ControlCommand::ShiftDown)),
            FuzzOp::ToggleMode => sim.update(0.0, Some(ControlCommand::ToggleMode)),
            FuzzOp::ApplyUpgrade { index } => {
                let upgrade = Upgrade::ALL[*index as usize % Upgrade::ALL.len()];
                let _ = sim.apply_upgrade(upgrade.id());
            }
            FuzzOp::SetWaterInjection { active } => sim.set_water_injection(*active),
            FuzzOp::Tick { millis } => sim.update(f64::from(*millis) / 1000.0, None),
        }
    }

    // Every bound is a clamped invariant; an escape is a bug, not an error.
    let state = &sim.state;
    assert!(state.rpm >= sim.spec.idle_rpm && state.rpm <= sim.spec.max_rpm);
    assert!(state.temperature >= TEMP_FLOOR_C && state.temperature <= TEMP_CEIL_C);
    assert!(state.acceleration.abs() <= ACCEL_LIMIT);
    assert!(state.jerk.abs() <= JERK_LIMIT);
    assert!(sim.metrics.volumetric_efficiency >= 0.7 && sim.metrics.volumetric_efficiency <= 1.0);
    let gear = sim.gearbox.current_gear();
    assert!(gear >= 1 && gear <= sim.gearbox.gear_count());
});
