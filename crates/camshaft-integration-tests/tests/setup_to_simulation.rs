//! Integration test: Setup File -> Simulation
//!
//! Exercises camshaft-data and camshaft-core end to end: write a setup file
//! to disk, load and validate it, build the simulation it describes, run it,
//! and check that what the file said is what the engine does. Covers a tuned
//! engine spec, a custom drivetrain shaping road speed, and upgrade lists
//! containing identifiers the catalog does not know.

use std::fs;
use std::path::{Path, PathBuf};

use camshaft_core::engine::Simulation;
use camshaft_core::gearbox::Gearbox;
use camshaft_core::performance;
use camshaft_core::test_utils::run_fixed;
use camshaft_core::upgrade::Upgrade;
use camshaft_data::load_setup;

/// Create a temporary directory with a unique name for test isolation.
fn make_test_dir(suffix: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "camshaft_integration_test_{suffix}_{}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Clean up a test directory.
fn cleanup(dir: &Path) {
    let _ = fs::remove_dir_all(dir);
}

/// Build the simulation a loaded setup describes and apply its upgrade list,
/// the same wiring the dashboard binary performs at startup.
fn sim_from_setup(setup: &camshaft_data::SimSetup, seed: u64) -> Simulation {
    let mut sim = Simulation::with_spec(
        setup.spec.clone(),
        Gearbox::new(setup.gear_ratios.clone()),
        seed,
    );
    if let Some(ids) = &setup.initial_upgrades {
        for id in ids {
            sim.apply_upgrade(id)
                .unwrap_or_else(|e| panic!("bad test setup: {e}"));
        }
    }
    sim
}

#[test]
fn tuned_setup_drives_a_tuned_simulation() {
    let dir = make_test_dir("tuned");
    let path = dir.join("tuned.ron");

    // A square four-cylinder with a short four-speed box, three power /
    // breathing upgrades preinstalled, and a pinned seed.
    fs::write(
        &path,
        r#"(
            engine: (
                bore: 0.095,
                stroke: 0.095,
                compression_ratio: 11.0,
                cylinders: 4,
            ),
            drivetrain: (
                gear_ratios: [3.0, 2.0, 1.3, 0.9],
            ),
            simulation: (
                seed: Some(21),
                initial_upgrades: Some([
                    "turbocharger",
                    "advanced_materials",
                    "enhanced_ecu",
                ]),
            ),
        )"#,
    )
    .unwrap();

    let setup = load_setup(&path).expect("tuned setup should load");
    let seed = setup.seed.expect("seed should come from the file");
    assert_eq!(seed, 21, "seed should round-trip through the file");

    let mut sim = sim_from_setup(&setup, seed);

    // The gearbox is the one the file described, not the stock five-speed.
    let snapshot = sim.snapshot(0.0);
    assert_eq!(
        snapshot.gear_count, 4,
        "gear count should come from the drivetrain section"
    );

    // Displacement is a pure function of the file's geometry.
    let expected_displacement = performance::displacement(&setup.spec);
    assert!(
        (snapshot.displacement - expected_displacement).abs() < 1e-12,
        "displacement should match the configured geometry, got {}",
        snapshot.displacement
    );

    // All three upgrades from the file are active in the registry.
    for upgrade in [
        Upgrade::Turbocharger,
        Upgrade::AdvancedMaterials,
        Upgrade::EnhancedEcu,
    ] {
        assert!(
            sim.upgrades.is_active(upgrade),
            "{upgrade} from the setup file should be active"
        );
    }
    assert_eq!(sim.upgrades.active_count(), 3);

    // Run the same engine without the upgrade list. Power depends only on
    // mean effective pressure, displacement, rpm, and the power multipliers,
    // and both runs replay the same seed, so the upgraded run's power is the
    // stock run's power scaled by exactly 1.2 * 1.05 * 1.05.
    let mut stock = Simulation::with_spec(
        setup.spec.clone(),
        Gearbox::new(setup.gear_ratios.clone()),
        seed,
    );
    run_fixed(&mut sim, 300, 1.0 / 60.0);
    run_fixed(&mut stock, 300, 1.0 / 60.0);

    let tuned_power = sim.snapshot(0.0).power_kw;
    let stock_power = stock.snapshot(0.0).power_kw;
    let expected_ratio = 1.2 * 1.05 * 1.05;
    assert!(
        (tuned_power / stock_power - expected_ratio).abs() < 1e-9,
        "upgrade power multipliers should compound: {tuned_power} vs {stock_power}"
    );

    cleanup(&dir);
}

#[test]
fn drivetrain_from_setup_shapes_road_speed() {
    let dir = make_test_dir("drivetrain");
    let path = dir.join("kart.toml");

    // A single-gear kart drivetrain. With one ratio the box can never shift,
    // so road speed stays a fixed function of rpm for the whole run.
    fs::write(
        &path,
        r#"
            [drivetrain]
            gear_ratios = [2.0]
            final_drive_ratio = 4.0
            wheel_radius = 0.25
        "#,
    )
    .unwrap();

    let setup = load_setup(&path).expect("kart setup should load");
    let mut sim = sim_from_setup(&setup, 7);
    run_fixed(&mut sim, 240, 1.0 / 60.0);

    let snapshot = sim.snapshot(0.0);
    assert_eq!(snapshot.gear, 1, "a one-speed box has nowhere to shift");
    assert_eq!(snapshot.gear_count, 1);

    // speed = wheel rpm * wheel circumference / 60, wheel rpm = rpm / (2 * 4).
    let wheel_rpm = snapshot.rpm / (2.0 * 4.0);
    let expected_speed = wheel_rpm * 2.0 * std::f64::consts::PI * 0.25 / 60.0;
    assert!(
        (snapshot.vehicle_speed - expected_speed).abs() < 1e-9,
        "road speed should follow the configured drivetrain, got {} want {}",
        snapshot.vehicle_speed,
        expected_speed
    );

    cleanup(&dir);
}

#[test]
fn unknown_upgrade_in_setup_is_reported_not_fatal() {
    let dir = make_test_dir("typo");
    let path = dir.join("typo.ron");

    // Upgrade identifiers are free-form strings in the file; the catalog
    // only vets them when they are applied. A typo must not take the whole
    // startup down with it.
    fs::write(
        &path,
        r#"(
            simulation: (
                initial_upgrades: Some(["turbocharger", "flux_capacitor"]),
            ),
        )"#,
    )
    .unwrap();

    let setup = load_setup(&path).expect("loading should not vet upgrade ids");
    let ids = setup.initial_upgrades.as_ref().unwrap();

    let mut sim = Simulation::with_spec(
        setup.spec.clone(),
        Gearbox::new(setup.gear_ratios.clone()),
        3,
    );
    let results: Vec<_> = ids.iter().map(|id| sim.apply_upgrade(id)).collect();

    assert_eq!(results[0], Ok(Upgrade::Turbocharger));
    let err = results[1].as_ref().expect_err("flux_capacitor is not real");
    assert_eq!(err.to_string(), "Unknown upgrade: flux_capacitor");

    // The good upgrade stuck and the engine still runs.
    assert!(sim.upgrades.is_active(Upgrade::Turbocharger));
    assert_eq!(sim.upgrades.active_count(), 1);
    run_fixed(&mut sim, 60, 1.0 / 60.0);
    assert_eq!(sim.tick(), 60, "a bad upgrade id should not stop the engine");

    cleanup(&dir);
}
