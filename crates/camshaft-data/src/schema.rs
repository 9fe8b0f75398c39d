//! Serde structs for the on-disk setup file.
//!
//! These define the format of a dashboard setup file in RON, JSON, or TOML.
//! Every field carries a default taken from the reference engine, so a
//! partial file (or an empty one) always deserializes. The loader validates
//! the result and resolves it into core types.

use camshaft_core::engine::EngineSpec;
use camshaft_core::gearbox::Gearbox;
use camshaft_core::runner::DEFAULT_HZ;
use serde::Deserialize;

// ===========================================================================
// Setup file
// ===========================================================================

/// Top-level contents of a setup file.
///
/// All three sections are optional; an empty file describes the reference
/// engine in a stock five-speed car.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SetupData {
    pub engine: EngineData,
    pub drivetrain: DrivetrainData,
    pub simulation: SimulationData,
}

// ===========================================================================
// Engine section
// ===========================================================================

/// Engine geometry and operating limits.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineData {
    /// Cylinder bore, m.
    pub bore: f64,
    /// Piston stroke, m.
    pub stroke: f64,
    pub compression_ratio: f64,
    pub cylinders: u32,
    /// Connecting rod length, m.
    pub rod_length: f64,
    pub idle_rpm: f64,
    pub max_rpm: f64,
    /// Mean effective pressure, Pa.
    pub mean_effective_pressure: f64,
    /// Coolant temperature the engine is tuned for, °C.
    pub optimal_temperature: f64,
}

impl Default for EngineData {
    fn default() -> Self {
        let spec = EngineSpec::default();
        Self {
            bore: spec.bore,
            stroke: spec.stroke,
            compression_ratio: spec.compression_ratio,
            cylinders: spec.cylinders,
            rod_length: spec.rod_length,
            idle_rpm: spec.idle_rpm,
            max_rpm: spec.max_rpm,
            mean_effective_pressure: spec.mean_effective_pressure,
            optimal_temperature: spec.optimal_temperature,
        }
    }
}

// ===========================================================================
// Drivetrain section
// ===========================================================================

/// Gearing between the crankshaft and the road.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DrivetrainData {
    /// Gear ratios, shortest (first gear) first.
    pub gear_ratios: Vec<f64>,
    pub final_drive_ratio: f64,
    /// Driven wheel radius, m.
    pub wheel_radius: f64,
}

impl Default for DrivetrainData {
    fn default() -> Self {
        let spec = EngineSpec::default();
        Self {
            gear_ratios: Gearbox::default().ratios().to_vec(),
            final_drive_ratio: spec.final_drive_ratio,
            wheel_radius: spec.wheel_radius,
        }
    }
}

// ===========================================================================
// Simulation section
// ===========================================================================

/// Run parameters for the dashboard process.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationData {
    /// RNG seed; a missing seed means "derive one from the clock".
    pub seed: Option<u64>,
    /// Target loop rate, frames per second.
    pub target_fps: u32,
    /// Upgrades applied before the first tick. When absent, the dashboard
    /// rolls a random subset instead.
    pub initial_upgrades: Option<Vec<String>>,
}

impl Default for SimulationData {
    fn default() -> Self {
        Self {
            seed: None,
            target_fps: DEFAULT_HZ,
            initial_upgrades: None,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Defaults
    // -----------------------------------------------------------------------

    #[test]
    fn engine_defaults_match_reference_spec() {
        let data = EngineData::default();
        let spec = EngineSpec::default();
        assert_eq!(data.bore, spec.bore);
        assert_eq!(data.stroke, spec.stroke);
        assert_eq!(data.compression_ratio, spec.compression_ratio);
        assert_eq!(data.cylinders, spec.cylinders);
        assert_eq!(data.idle_rpm, spec.idle_rpm);
        assert_eq!(data.max_rpm, spec.max_rpm);
    }

    #[test]
    fn drivetrain_defaults_match_stock_gearbox() {
        let data = DrivetrainData::default();
        assert_eq!(data.gear_ratios, vec![3.42, 2.14, 1.45, 1.00, 0.83]);
        assert_eq!(data.final_drive_ratio, 3.73);
        assert_eq!(data.wheel_radius, 0.3175);
    }

    #[test]
    fn simulation_defaults() {
        let data = SimulationData::default();
        assert_eq!(data.seed, None);
        assert_eq!(data.target_fps, 60);
        assert!(data.initial_upgrades.is_none());
    }

    // -----------------------------------------------------------------------
    // RON deserialization
    // -----------------------------------------------------------------------

    #[test]
    fn setup_from_ron() {
        let ron = r#"
            (
                engine: (
                    bore: 0.092,
                    stroke: 0.075,
                    compression_ratio: 12.5,
                    cylinders: 4,
                ),
                drivetrain: (
                    gear_ratios: [3.8, 2.3, 1.5, 1.0],
                    final_drive_ratio: 4.1,
                ),
                simulation: (
                    seed: Some(7),
                    target_fps: 30,
                    initial_upgrades: Some(["turbocharger"]),
                ),
            )
        "#;
        let setup: SetupData = ron::from_str(ron).unwrap();
        assert_eq!(setup.engine.bore, 0.092);
        assert_eq!(setup.engine.cylinders, 4);
        assert_eq!(setup.drivetrain.gear_ratios.len(), 4);
        assert_eq!(setup.drivetrain.final_drive_ratio, 4.1);
        assert_eq!(setup.simulation.seed, Some(7));
        assert_eq!(setup.simulation.target_fps, 30);
        assert_eq!(
            setup.simulation.initial_upgrades,
            Some(vec!["turbocharger".to_string()])
        );
    }

    #[test]
    fn partial_ron_fills_remaining_sections() {
        let ron = r#"(engine: (cylinders: 6))"#;
        let setup: SetupData = ron::from_str(ron).unwrap();
        assert_eq!(setup.engine.cylinders, 6);
        // Untouched engine fields and whole sections fall back to stock.
        assert_eq!(setup.engine.bore, EngineSpec::default().bore);
        assert_eq!(setup.drivetrain, DrivetrainData::default());
        assert_eq!(setup.simulation, SimulationData::default());
    }

    #[test]
    fn empty_ron_is_the_reference_setup() {
        let setup: SetupData = ron::from_str("()").unwrap();
        assert_eq!(setup.engine, EngineData::default());
        assert_eq!(setup.drivetrain, DrivetrainData::default());
    }

    // -----------------------------------------------------------------------
    // JSON deserialization
    // -----------------------------------------------------------------------

    #[test]
    fn setup_from_json() {
        let json = r#"{
            "engine": {"max_rpm": 7500.0},
            "simulation": {"seed": 42}
        }"#;
        let setup: SetupData = serde_json::from_str(json).unwrap();
        assert_eq!(setup.engine.max_rpm, 7500.0);
        assert_eq!(setup.engine.idle_rpm, EngineSpec::default().idle_rpm);
        assert_eq!(setup.simulation.seed, Some(42));
    }

    #[test]
    fn empty_json_object_is_the_reference_setup() {
        let setup: SetupData = serde_json::from_str("{}").unwrap();
        assert_eq!(setup.engine, EngineData::default());
        assert_eq!(setup.simulation.target_fps, 60);
    }

    // -----------------------------------------------------------------------
    // TOML deserialization
    // -----------------------------------------------------------------------

    #[test]
    fn setup_from_toml() {
        let toml_str = r#"
            [engine]
            bore = 0.081
            cylinders = 4

            [drivetrain]
            gear_ratios = [3.6, 2.1, 1.4, 1.0, 0.8, 0.65]

            [simulation]
            target_fps = 120
        "#;
        let setup: SetupData = toml::from_str(toml_str).unwrap();
        assert_eq!(setup.engine.bore, 0.081);
        assert_eq!(setup.drivetrain.gear_ratios.len(), 6);
        assert_eq!(setup.simulation.target_fps, 120);
    }

    #[test]
    fn empty_toml_is_the_reference_setup() {
        let setup: SetupData = toml::from_str("").unwrap();
        assert_eq!(setup.engine, EngineData::default());
        assert_eq!(setup.drivetrain, DrivetrainData::default());
        assert_eq!(setup.simulation, SimulationData::default());
    }
}
